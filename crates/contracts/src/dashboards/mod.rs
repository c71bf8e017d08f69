pub mod d400_reports;
