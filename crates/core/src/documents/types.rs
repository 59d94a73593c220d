//! Document and transaction record types.

use chrono::{DateTime, NaiveDate, Utc};
use costwise_shared::types::{
    BudgetId, ContactId, CostCenterId, DocumentId, DocumentLineId, ProductId, TransactionRecordId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::PostingError;

/// Kind of commercial document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Purchase order.
    PurchaseOrder,
    /// Sales order.
    SalesOrder,
    /// Vendor bill.
    VendorBill,
    /// Customer invoice.
    CustomerInvoice,
}

impl DocumentType {
    /// Parse a document type from a string.
    ///
    /// # Errors
    ///
    /// Returns `PostingError::UnknownValue` for unrecognized input.
    pub fn parse(s: &str) -> Result<Self, PostingError> {
        match s.to_lowercase().as_str() {
            "purchase_order" | "po" => Ok(Self::PurchaseOrder),
            "sales_order" | "so" => Ok(Self::SalesOrder),
            "vendor_bill" => Ok(Self::VendorBill),
            "customer_invoice" => Ok(Self::CustomerInvoice),
            _ => Err(PostingError::UnknownValue(s.to_string())),
        }
    }

    /// Returns the string representation of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PurchaseOrder => "purchase_order",
            Self::SalesOrder => "sales_order",
            Self::VendorBill => "vendor_bill",
            Self::CustomerInvoice => "customer_invoice",
        }
    }

    /// Purchase orders and vendor bills count as spend on the dashboard.
    #[must_use]
    pub const fn is_spend(&self) -> bool {
        matches!(self, Self::PurchaseOrder | Self::VendorBill)
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Being edited.
    Draft,
    /// Purchase awaiting vendor confirmation.
    PendingVendor,
    /// Posted; counts towards achievement.
    Posted,
    /// Partially paid.
    Partial,
    /// Fully paid.
    Paid,
    /// Cancelled.
    Cancelled,
}

impl DocumentStatus {
    /// Parse a status from a string.
    ///
    /// # Errors
    ///
    /// Returns `PostingError::UnknownValue` for unrecognized input.
    pub fn parse(s: &str) -> Result<Self, PostingError> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "pending_vendor" => Ok(Self::PendingVendor),
            "posted" => Ok(Self::Posted),
            "partial" => Ok(Self::Partial),
            "paid" => Ok(Self::Paid),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(PostingError::UnknownValue(s.to_string())),
        }
    }

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingVendor => "pending_vendor",
            Self::Posted => "posted",
            Self::Partial => "partial",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if the document has not been posted or cancelled yet.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Draft | Self::PendingVendor)
    }

    /// Validates a forward transition and returns the new status.
    ///
    /// # Errors
    ///
    /// Returns `PostingError::InvalidTransition` for a backward or unknown move.
    pub fn transition_to(self, to: Self) -> Result<Self, PostingError> {
        match (self, to) {
            (Self::Draft | Self::PendingVendor, Self::Posted | Self::Cancelled)
            | (Self::Posted, Self::Partial | Self::Paid)
            | (Self::Partial, Self::Paid) => Ok(to),
            _ => Err(PostingError::InvalidTransition { from: self, to }),
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLine {
    /// Line ID.
    pub id: DocumentLineId,
    /// Parent document.
    pub document_id: DocumentId,
    /// Product on the line.
    pub product_id: ProductId,
    /// Quantity.
    pub quantity: Decimal,
    /// Unit price.
    pub unit_price: Decimal,
    /// `quantity * unit_price`.
    pub line_total: Decimal,
}

/// A purchase order, sales order, vendor bill, or customer invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document ID.
    pub id: DocumentId,
    /// Document kind.
    pub document_type: DocumentType,
    /// Customer or vendor.
    pub contact_id: ContactId,
    /// Header cost center; filled at posting when absent.
    pub cost_center_id: Option<CostCenterId>,
    /// Sum of line totals.
    pub total_amount: Decimal,
    /// Lifecycle status.
    pub status: DocumentStatus,
    /// Sales order an invoice was generated from.
    pub source_document_id: Option<DocumentId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Line items.
    pub lines: Vec<DocumentLine>,
}

/// Input for one document line.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDocumentLine {
    /// Product on the line.
    pub product_id: ProductId,
    /// Quantity; must be positive.
    pub quantity: Decimal,
    /// Unit price; must not be negative.
    pub unit_price: Decimal,
}

/// Input for creating a document.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDocument {
    /// Document kind.
    pub document_type: DocumentType,
    /// Customer or vendor.
    pub contact_id: ContactId,
    /// Optional header cost center.
    #[serde(default)]
    pub cost_center_id: Option<CostCenterId>,
    /// Create in `pending_vendor` instead of `draft`.
    #[serde(default)]
    pub awaiting_vendor: bool,
    /// Line items.
    pub lines: Vec<NewDocumentLine>,
}

impl Document {
    /// Creates an open document, computing line and header totals.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty document, a non-positive quantity, a
    /// negative price, or a non-purchase document awaiting a vendor.
    pub fn new(input: NewDocument, now: DateTime<Utc>) -> Result<Self, PostingError> {
        if input.lines.is_empty() {
            return Err(PostingError::EmptyDocument);
        }
        if input.awaiting_vendor && !input.document_type.is_spend() {
            return Err(PostingError::PendingVendorNotAllowed(input.document_type));
        }

        let id = DocumentId::new();
        let lines = input
            .lines
            .into_iter()
            .map(|line| {
                if line.quantity <= Decimal::ZERO {
                    return Err(PostingError::NonPositiveQuantity);
                }
                if line.unit_price < Decimal::ZERO {
                    return Err(PostingError::NegativePrice);
                }
                Ok(DocumentLine {
                    id: DocumentLineId::new(),
                    document_id: id,
                    product_id: line.product_id,
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    line_total: line.quantity * line.unit_price,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id,
            document_type: input.document_type,
            contact_id: input.contact_id,
            cost_center_id: input.cost_center_id,
            total_amount: lines.iter().map(|l| l.line_total).sum(),
            status: if input.awaiting_vendor {
                DocumentStatus::PendingVendor
            } else {
                DocumentStatus::Draft
            },
            source_document_id: None,
            created_at: now,
            lines,
        })
    }

    /// Creation date (timestamp truncated to the day).
    #[must_use]
    pub fn created_on(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    /// Returns true if the document is posted and of the given type.
    #[must_use]
    pub fn is_posted(&self, document_type: DocumentType) -> bool {
        self.status == DocumentStatus::Posted && self.document_type == document_type
    }
}

/// One assigned line appended when a document is posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Record ID.
    pub id: TransactionRecordId,
    /// Posted document.
    pub document_id: DocumentId,
    /// Source line.
    pub document_line_id: DocumentLineId,
    /// Product on the line.
    pub product_id: ProductId,
    /// Assigned cost center, if any.
    pub cost_center_id: Option<CostCenterId>,
    /// Confirmed budget covering the cost center on the posting date.
    pub budget_id: Option<BudgetId>,
    /// Line total.
    pub amount: Decimal,
    /// Posting timestamp.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn line(quantity: Decimal, unit_price: Decimal) -> NewDocumentLine {
        NewDocumentLine {
            product_id: ProductId::new(),
            quantity,
            unit_price,
        }
    }

    fn input(document_type: DocumentType, lines: Vec<NewDocumentLine>) -> NewDocument {
        NewDocument {
            document_type,
            contact_id: ContactId::new(),
            cost_center_id: None,
            awaiting_vendor: false,
            lines,
        }
    }

    #[test]
    fn test_new_document_totals() {
        let doc = Document::new(
            input(
                DocumentType::SalesOrder,
                vec![line(dec!(2), dec!(150.25)), line(dec!(1), dec!(99.50))],
            ),
            Utc::now(),
        )
        .unwrap();

        assert_eq!(doc.status, DocumentStatus::Draft);
        assert_eq!(doc.lines[0].line_total, dec!(300.50));
        assert_eq!(doc.total_amount, dec!(400.00));
        assert!(doc.lines.iter().all(|l| l.document_id == doc.id));
    }

    #[test]
    fn test_new_document_validation() {
        let now = Utc::now();
        assert_eq!(
            Document::new(input(DocumentType::VendorBill, vec![]), now),
            Err(PostingError::EmptyDocument)
        );
        assert_eq!(
            Document::new(input(DocumentType::VendorBill, vec![line(dec!(0), dec!(1))]), now),
            Err(PostingError::NonPositiveQuantity)
        );
        assert_eq!(
            Document::new(input(DocumentType::VendorBill, vec![line(dec!(1), dec!(-1))]), now),
            Err(PostingError::NegativePrice)
        );
    }

    #[test]
    fn test_awaiting_vendor_only_for_purchases() {
        let now = Utc::now();
        let mut po = input(DocumentType::PurchaseOrder, vec![line(dec!(1), dec!(10))]);
        po.awaiting_vendor = true;
        assert_eq!(
            Document::new(po, now).unwrap().status,
            DocumentStatus::PendingVendor
        );

        let mut so = input(DocumentType::SalesOrder, vec![line(dec!(1), dec!(10))]);
        so.awaiting_vendor = true;
        assert_eq!(
            Document::new(so, now),
            Err(PostingError::PendingVendorNotAllowed(DocumentType::SalesOrder))
        );
    }

    #[rstest]
    #[case(DocumentStatus::Draft, DocumentStatus::Posted, true)]
    #[case(DocumentStatus::PendingVendor, DocumentStatus::Posted, true)]
    #[case(DocumentStatus::Draft, DocumentStatus::Cancelled, true)]
    #[case(DocumentStatus::Posted, DocumentStatus::Partial, true)]
    #[case(DocumentStatus::Partial, DocumentStatus::Paid, true)]
    #[case(DocumentStatus::Posted, DocumentStatus::Paid, true)]
    #[case(DocumentStatus::Posted, DocumentStatus::Posted, false)]
    #[case(DocumentStatus::Posted, DocumentStatus::Cancelled, false)]
    #[case(DocumentStatus::Paid, DocumentStatus::Partial, false)]
    #[case(DocumentStatus::Cancelled, DocumentStatus::Posted, false)]
    fn test_status_transitions(
        #[case] from: DocumentStatus,
        #[case] to: DocumentStatus,
        #[case] allowed: bool,
    ) {
        assert_eq!(from.transition_to(to).is_ok(), allowed);
    }

    #[test]
    fn test_type_parse_roundtrip() {
        for t in [
            DocumentType::PurchaseOrder,
            DocumentType::SalesOrder,
            DocumentType::VendorBill,
            DocumentType::CustomerInvoice,
        ] {
            assert_eq!(DocumentType::parse(t.as_str()).unwrap(), t);
        }
        assert_eq!(DocumentType::parse("SO").unwrap(), DocumentType::SalesOrder);
        assert!(DocumentType::parse("receipt").is_err());
    }
}
