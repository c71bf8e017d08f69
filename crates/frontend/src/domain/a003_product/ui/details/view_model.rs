use contracts::domain::a003_product::aggregate::{Product, ProductDto};
use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;

use crate::shared::components::form_modal::submit_form;
use crate::shared::components::ui::{optional_text, parse_decimal};
use crate::shared::registry::RegistryHook;

/// Prices are typed as text so "7,50" and "7.50" both work
#[derive(Clone, Copy)]
pub struct ProductDetailsViewModel {
    pub id: Option<i64>,
    pub codigo: RwSignal<String>,
    pub nombre: RwSignal<String>,
    pub categoria: RwSignal<String>,
    pub unidad: RwSignal<String>,
    pub precio_compra: RwSignal<String>,
    pub precio_venta: RwSignal<String>,
    pub errors: RwSignal<FieldErrors>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
}

impl ProductDetailsViewModel {
    pub fn new(product: Option<&Product>) -> Self {
        let dto = product.map(ProductDto::from);
        let price = |v: Option<f64>| v.map(|v| format!("{:.2}", v)).unwrap_or_default();
        Self {
            id: dto.as_ref().and_then(|d| d.id),
            codigo: RwSignal::new(dto.as_ref().map(|d| d.codigo.clone()).unwrap_or_default()),
            nombre: RwSignal::new(dto.as_ref().map(|d| d.nombre.clone()).unwrap_or_default()),
            categoria: RwSignal::new(dto.as_ref().and_then(|d| d.categoria.clone()).unwrap_or_default()),
            unidad: RwSignal::new(dto.as_ref().and_then(|d| d.unidad.clone()).unwrap_or_default()),
            precio_compra: RwSignal::new(price(dto.as_ref().map(|d| d.precio_compra))),
            precio_venta: RwSignal::new(price(dto.as_ref().map(|d| d.precio_venta))),
            errors: RwSignal::new(FieldErrors::new()),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
        }
    }

    /// Unparseable prices are reported on their own field
    fn collect(&self) -> Result<ProductDto, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut price = |field: &'static str, raw: String| match parse_decimal(&raw) {
            Some(v) => v,
            None => {
                errors.check(field, Err("Ingrese un valor numérico".to_string()));
                0.0
            }
        };
        let precio_compra = price("precioCompra", self.precio_compra.get_untracked());
        let precio_venta = price("precioVenta", self.precio_venta.get_untracked());
        let dto = ProductDto {
            id: self.id,
            codigo: self.codigo.get_untracked().trim().to_string(),
            nombre: self.nombre.get_untracked().trim().to_string(),
            categoria: optional_text(&self.categoria.get_untracked()),
            unidad: optional_text(&self.unidad.get_untracked()),
            precio_compra,
            precio_venta,
        };
        if let Err(more) = dto.validate() {
            for (field, message) in more.iter() {
                if errors.get(field).is_none() {
                    errors.check(*field, Err(message.to_string()));
                }
            }
        }
        errors.into_result().map(|()| dto)
    }

    pub fn save(&self, hook: RegistryHook<Product>, on_done: Callback<()>) {
        let dto = match self.collect() {
            Ok(dto) => dto,
            Err(errors) => {
                self.errors.set(errors);
                return;
            }
        };
        self.errors.set(FieldErrors::new());
        let id = self.id;
        submit_form(self.saving, self.error, on_done, move || async move {
            let name = dto.nombre.clone();
            match id {
                Some(id) => hook.update(id, dto, &name).await,
                None => hook.create(dto, &name).await,
            }
        });
    }
}
