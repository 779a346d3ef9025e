mod model;

pub use model::{
    Invoice, InvoiceLineItem, InvoiceStatus, Payment, PaymentMethod, PaymentStatus,
};
