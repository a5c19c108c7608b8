pub mod ocr;
pub mod pdf;
pub mod table;
