//! Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `contact_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "contact_type")]
pub enum ContactType {
    /// Customer.
    #[sea_orm(string_value = "customer")]
    Customer,
    /// Vendor.
    #[sea_orm(string_value = "vendor")]
    Vendor,
    /// Customer and vendor.
    #[sea_orm(string_value = "both")]
    Both,
}

/// `model_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "model_status")]
pub enum ModelStatus {
    /// Draft.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Confirmed.
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    /// Cancelled.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// `rule_kind` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "rule_kind")]
pub enum RuleKind {
    /// Product rule.
    #[sea_orm(string_value = "product")]
    Product,
    /// Category rule.
    #[sea_orm(string_value = "category")]
    Category,
}

/// `budget_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "budget_status")]
pub enum BudgetStatus {
    /// Draft.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Active.
    #[sea_orm(string_value = "active")]
    Active,
    /// Confirmed.
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    /// Revised.
    #[sea_orm(string_value = "revised")]
    Revised,
    /// Cancelled.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// `budget_line_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "budget_line_type")]
pub enum BudgetLineType {
    /// Income.
    #[sea_orm(string_value = "income")]
    Income,
    /// Expense.
    #[sea_orm(string_value = "expense")]
    Expense,
}

/// `document_type` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "document_type")]
pub enum DocumentType {
    /// Purchase order.
    #[sea_orm(string_value = "purchase_order")]
    PurchaseOrder,
    /// Sales order.
    #[sea_orm(string_value = "sales_order")]
    SalesOrder,
    /// Vendor bill.
    #[sea_orm(string_value = "vendor_bill")]
    VendorBill,
    /// Customer invoice.
    #[sea_orm(string_value = "customer_invoice")]
    CustomerInvoice,
}

/// `document_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "document_status")]
pub enum DocumentStatus {
    /// Draft.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Waiting for the vendor.
    #[sea_orm(string_value = "pending_vendor")]
    PendingVendor,
    /// Posted.
    #[sea_orm(string_value = "posted")]
    Posted,
    /// Partially paid.
    #[sea_orm(string_value = "partial")]
    Partial,
    /// Paid.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Cancelled.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}
