pub mod department;
pub mod seller;

pub use department::Department;
pub use seller::Seller;
