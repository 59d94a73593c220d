//! Conversions between entity models and domain types.

use chrono::Utc;
use costwise_core::budget::{Budget, BudgetLine, BudgetLineType, BudgetStatus};
use costwise_core::documents::{
    Document, DocumentLine, DocumentStatus, DocumentType, TransactionRecord,
};
use costwise_core::matching::{LegacyRule, MatchCriteria, MatchingModel, ModelStatus, RuleKind};
use costwise_core::reference::{Contact, ContactType, CostCenter, PartnerTag, Product};
use costwise_shared::types::{
    BudgetId, BudgetLineId, ContactId, CostCenterId, DocumentId, DocumentLineId, LegacyRuleId,
    MatchingModelId, PartnerTagId, ProductId, TransactionRecordId,
};
use sea_orm::{ActiveValue::Set, prelude::DateTimeWithTimeZone};

use crate::entities::{
    budget_lines, budgets, contacts, cost_centers, document_lines, documents, legacy_rules,
    matching_models, partner_tags, products, sea_orm_active_enums as db, transaction_records,
};

macro_rules! enum_mapping {
    ($db:ident, $core:ident, [$($variant:ident),+ $(,)?]) => {
        impl From<db::$db> for $core {
            fn from(value: db::$db) -> Self {
                match value {
                    $(db::$db::$variant => Self::$variant,)+
                }
            }
        }

        impl From<$core> for db::$db {
            fn from(value: $core) -> Self {
                match value {
                    $($core::$variant => Self::$variant,)+
                }
            }
        }
    };
}

enum_mapping!(ContactType, ContactType, [Customer, Vendor, Both]);
enum_mapping!(ModelStatus, ModelStatus, [Draft, Confirmed, Cancelled]);
enum_mapping!(RuleKind, RuleKind, [Product, Category]);
enum_mapping!(BudgetStatus, BudgetStatus, [Draft, Active, Confirmed, Revised, Cancelled]);
enum_mapping!(BudgetLineType, BudgetLineType, [Income, Expense]);
enum_mapping!(
    DocumentType,
    DocumentType,
    [PurchaseOrder, SalesOrder, VendorBill, CustomerInvoice]
);
enum_mapping!(
    DocumentStatus,
    DocumentStatus,
    [Draft, PendingVendor, Posted, Partial, Paid, Cancelled]
);

fn utc(value: DateTimeWithTimeZone) -> chrono::DateTime<Utc> {
    value.with_timezone(&Utc)
}

impl From<cost_centers::Model> for CostCenter {
    fn from(model: cost_centers::Model) -> Self {
        Self {
            id: CostCenterId::from_uuid(model.id),
            name: model.name,
        }
    }
}

impl From<partner_tags::Model> for PartnerTag {
    fn from(model: partner_tags::Model) -> Self {
        Self {
            id: PartnerTagId::from_uuid(model.id),
            name: model.name,
        }
    }
}

impl From<contacts::Model> for Contact {
    fn from(model: contacts::Model) -> Self {
        Self {
            id: ContactId::from_uuid(model.id),
            name: model.name,
            contact_type: model.contact_type.into(),
            tag_id: model.tag_id.map(PartnerTagId::from_uuid),
        }
    }
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self {
            id: ProductId::from_uuid(model.id),
            name: model.name,
            category: model.category,
            price: model.price,
            vendor_id: model.vendor_id.map(ContactId::from_uuid),
        }
    }
}

impl From<matching_models::Model> for MatchingModel {
    fn from(model: matching_models::Model) -> Self {
        Self {
            id: MatchingModelId::from_uuid(model.id),
            name: model.name,
            status: model.status.into(),
            criteria: MatchCriteria {
                product_id: model.product_id.map(ProductId::from_uuid),
                partner_id: model.partner_id.map(ContactId::from_uuid),
                product_category: model.product_category,
                partner_tag_id: model.partner_tag_id.map(PartnerTagId::from_uuid),
            },
            cost_center_id: CostCenterId::from_uuid(model.cost_center_id),
            created_at: utc(model.created_at),
        }
    }
}

impl From<&MatchingModel> for matching_models::ActiveModel {
    fn from(model: &MatchingModel) -> Self {
        Self {
            id: Set(model.id.into_inner()),
            name: Set(model.name.clone()),
            status: Set(model.status.into()),
            product_id: Set(model.criteria.product_id.map(ProductId::into_inner)),
            partner_id: Set(model.criteria.partner_id.map(ContactId::into_inner)),
            product_category: Set(model.criteria.product_category.clone()),
            partner_tag_id: Set(model.criteria.partner_tag_id.map(PartnerTagId::into_inner)),
            cost_center_id: Set(model.cost_center_id.into_inner()),
            created_at: Set(model.created_at.into()),
            updated_at: Set(model.created_at.into()),
        }
    }
}

impl From<legacy_rules::Model> for LegacyRule {
    fn from(model: legacy_rules::Model) -> Self {
        Self {
            id: LegacyRuleId::from_uuid(model.id),
            kind: model.kind.into(),
            value: model.value,
            cost_center_id: CostCenterId::from_uuid(model.cost_center_id),
            created_at: utc(model.created_at),
        }
    }
}

impl From<&LegacyRule> for legacy_rules::ActiveModel {
    fn from(rule: &LegacyRule) -> Self {
        Self {
            id: Set(rule.id.into_inner()),
            kind: Set(rule.kind.into()),
            value: Set(rule.value.clone()),
            cost_center_id: Set(rule.cost_center_id.into_inner()),
            created_at: Set(rule.created_at.into()),
        }
    }
}

impl From<budgets::Model> for Budget {
    fn from(model: budgets::Model) -> Self {
        Self {
            id: BudgetId::from_uuid(model.id),
            name: model.name,
            cost_center_id: CostCenterId::from_uuid(model.cost_center_id),
            amount: model.amount,
            start_date: model.start_date,
            end_date: model.end_date,
            status: model.status.into(),
            revised_from_id: model.revised_from_id.map(BudgetId::from_uuid),
            created_at: utc(model.created_at),
            updated_at: utc(model.updated_at),
        }
    }
}

impl From<&Budget> for budgets::ActiveModel {
    fn from(budget: &Budget) -> Self {
        Self {
            id: Set(budget.id.into_inner()),
            name: Set(budget.name.clone()),
            cost_center_id: Set(budget.cost_center_id.into_inner()),
            amount: Set(budget.amount),
            start_date: Set(budget.start_date),
            end_date: Set(budget.end_date),
            status: Set(budget.status.into()),
            revised_from_id: Set(budget.revised_from_id.map(BudgetId::into_inner)),
            created_at: Set(budget.created_at.into()),
            updated_at: Set(budget.updated_at.into()),
        }
    }
}

impl From<budget_lines::Model> for BudgetLine {
    fn from(model: budget_lines::Model) -> Self {
        Self {
            id: BudgetLineId::from_uuid(model.id),
            budget_id: BudgetId::from_uuid(model.budget_id),
            matching_model_id: MatchingModelId::from_uuid(model.matching_model_id),
            line_type: model.line_type.into(),
            budgeted_amount: model.budgeted_amount,
            created_at: utc(model.created_at),
        }
    }
}

impl From<&BudgetLine> for budget_lines::ActiveModel {
    fn from(line: &BudgetLine) -> Self {
        Self {
            id: Set(line.id.into_inner()),
            budget_id: Set(line.budget_id.into_inner()),
            matching_model_id: Set(line.matching_model_id.into_inner()),
            line_type: Set(line.line_type.into()),
            budgeted_amount: Set(line.budgeted_amount),
            created_at: Set(line.created_at.into()),
        }
    }
}

impl From<document_lines::Model> for DocumentLine {
    fn from(model: document_lines::Model) -> Self {
        Self {
            id: DocumentLineId::from_uuid(model.id),
            document_id: DocumentId::from_uuid(model.document_id),
            product_id: ProductId::from_uuid(model.product_id),
            quantity: model.quantity,
            unit_price: model.unit_price,
            line_total: model.line_total,
        }
    }
}

/// Assembles a document from its header and lines, ordered by line number.
pub fn document_from_parts(
    header: documents::Model,
    mut lines: Vec<document_lines::Model>,
) -> Document {
    lines.sort_by_key(|l| l.line_no);
    Document {
        id: DocumentId::from_uuid(header.id),
        document_type: header.document_type.into(),
        contact_id: ContactId::from_uuid(header.contact_id),
        cost_center_id: header.cost_center_id.map(CostCenterId::from_uuid),
        total_amount: header.total_amount,
        status: header.status.into(),
        source_document_id: header.source_document_id.map(DocumentId::from_uuid),
        created_at: utc(header.created_at),
        lines: lines.into_iter().map(DocumentLine::from).collect(),
    }
}

impl From<&Document> for documents::ActiveModel {
    fn from(document: &Document) -> Self {
        Self {
            id: Set(document.id.into_inner()),
            document_type: Set(document.document_type.into()),
            contact_id: Set(document.contact_id.into_inner()),
            cost_center_id: Set(document.cost_center_id.map(CostCenterId::into_inner)),
            total_amount: Set(document.total_amount),
            status: Set(document.status.into()),
            source_document_id: Set(document.source_document_id.map(DocumentId::into_inner)),
            created_at: Set(document.created_at.into()),
            updated_at: Set(document.created_at.into()),
        }
    }
}

/// Active models for the lines of a document, numbered from 1.
pub fn document_line_models(document: &Document) -> Vec<document_lines::ActiveModel> {
    document
        .lines
        .iter()
        .zip(1..)
        .map(|(line, line_no)| document_lines::ActiveModel {
            id: Set(line.id.into_inner()),
            document_id: Set(line.document_id.into_inner()),
            line_no: Set(line_no),
            product_id: Set(line.product_id.into_inner()),
            quantity: Set(line.quantity),
            unit_price: Set(line.unit_price),
            line_total: Set(line.line_total),
        })
        .collect()
}

impl From<transaction_records::Model> for TransactionRecord {
    fn from(model: transaction_records::Model) -> Self {
        Self {
            id: TransactionRecordId::from_uuid(model.id),
            document_id: DocumentId::from_uuid(model.document_id),
            document_line_id: DocumentLineId::from_uuid(model.document_line_id),
            product_id: ProductId::from_uuid(model.product_id),
            cost_center_id: model.cost_center_id.map(CostCenterId::from_uuid),
            budget_id: model.budget_id.map(BudgetId::from_uuid),
            amount: model.amount,
            created_at: utc(model.created_at),
        }
    }
}

impl From<&TransactionRecord> for transaction_records::ActiveModel {
    fn from(record: &TransactionRecord) -> Self {
        Self {
            id: Set(record.id.into_inner()),
            document_id: Set(record.document_id.into_inner()),
            document_line_id: Set(record.document_line_id.into_inner()),
            product_id: Set(record.product_id.into_inner()),
            cost_center_id: Set(record.cost_center_id.map(CostCenterId::into_inner)),
            budget_id: Set(record.budget_id.map(BudgetId::into_inner)),
            amount: Set(record.amount),
            created_at: Set(record.created_at.into()),
        }
    }
}
