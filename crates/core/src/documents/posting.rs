//! Document posting.
//!
//! Posting assigns every line a cost center through a [`CostCenterResolver`],
//! falling back to a configured cost center, and produces one transaction
//! record per line. Posting a sales order also produces a posted customer
//! invoice with the same lines, which is assigned on its own.

use chrono::{DateTime, Utc};
use costwise_shared::types::{CostCenterId, DocumentLineId, TransactionRecordId};
use serde::Serialize;

use super::error::PostingError;
use super::types::{Document, DocumentLine, DocumentStatus, DocumentType, TransactionRecord};
use crate::budget::{Budget, BudgetService};
use crate::matching::CostCenterResolver;

/// A document in its posted state together with its transaction records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostedDocument {
    /// The posted document.
    pub document: Document,
    /// One record per line.
    pub records: Vec<TransactionRecord>,
}

/// Everything a posting writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostingPlan {
    /// The document that was posted.
    pub posted: PostedDocument,
    /// Customer invoice generated from a sales order.
    pub generated_invoice: Option<PostedDocument>,
}

/// Where posting takes its cost centers and budgets from.
pub struct PostingContext<'a, R: ?Sized> {
    /// Line assignment strategy.
    pub resolver: &'a R,
    /// Used when the resolver finds nothing.
    pub fallback_cost_center_id: Option<CostCenterId>,
    /// Candidate budgets for transaction records.
    pub budgets: &'a [Budget],
}

/// Stateless posting service.
pub struct PostingService;

impl PostingService {
    /// Posts an open document.
    ///
    /// The returned plan holds the posted document (header cost center filled
    /// from its first assigned line when absent) and its records.
    ///
    /// # Errors
    ///
    /// Returns `PostingError::InvalidTransition` unless the document is draft
    /// or pending vendor.
    pub fn post<R: CostCenterResolver + ?Sized>(
        document: &Document,
        context: &PostingContext<'_, R>,
        now: DateTime<Utc>,
    ) -> Result<PostingPlan, PostingError> {
        let mut posted = document.clone();
        posted.status = document.status.transition_to(DocumentStatus::Posted)?;
        let posted = Self::assign(posted, context, now);

        let generated_invoice = (posted.document.document_type == DocumentType::SalesOrder)
            .then(|| Self::assign(Self::invoice_for(&posted.document, now), context, now));

        tracing::info!(
            document_id = %document.id,
            document_type = %document.document_type,
            strategy = context.resolver.name(),
            lines = posted.records.len(),
            generated_invoice = generated_invoice.is_some(),
            "Document posted"
        );

        Ok(PostingPlan {
            posted,
            generated_invoice,
        })
    }

    /// Builds the posted customer invoice for a sales order.
    #[must_use]
    pub fn invoice_for(order: &Document, now: DateTime<Utc>) -> Document {
        let id = costwise_shared::types::DocumentId::new();
        Document {
            id,
            document_type: DocumentType::CustomerInvoice,
            contact_id: order.contact_id,
            cost_center_id: order.cost_center_id,
            total_amount: order.total_amount,
            status: DocumentStatus::Posted,
            source_document_id: Some(order.id),
            created_at: now,
            lines: order
                .lines
                .iter()
                .map(|line| DocumentLine {
                    id: DocumentLineId::new(),
                    document_id: id,
                    ..line.clone()
                })
                .collect(),
        }
    }

    /// Cancels an open document.
    ///
    /// # Errors
    ///
    /// Returns `PostingError::InvalidTransition` unless the document is draft
    /// or pending vendor.
    pub fn cancel(document: &mut Document) -> Result<(), PostingError> {
        document.status = document.status.transition_to(DocumentStatus::Cancelled)?;
        Ok(())
    }

    /// Records payment progress on a posted document.
    ///
    /// # Errors
    ///
    /// Returns `PostingError::InvalidTransition` for an unpaid-to-paid move
    /// that skips posting, or any backward move.
    pub fn record_payment(document: &mut Document, fully_paid: bool) -> Result<(), PostingError> {
        let to = if fully_paid {
            DocumentStatus::Paid
        } else {
            DocumentStatus::Partial
        };
        document.status = document.status.transition_to(to)?;
        Ok(())
    }

    fn assign<R: CostCenterResolver + ?Sized>(
        mut document: Document,
        context: &PostingContext<'_, R>,
        now: DateTime<Utc>,
    ) -> PostedDocument {
        let posting_date = now.date_naive();
        let records: Vec<_> = document
            .lines
            .iter()
            .map(|line| {
                let cost_center_id = Self::line_cost_center(&document, line, context);
                let budget_id = cost_center_id
                    .and_then(|cc| BudgetService::select_for(context.budgets, cc, posting_date))
                    .map(|b| b.id);

                TransactionRecord {
                    id: TransactionRecordId::new(),
                    document_id: document.id,
                    document_line_id: line.id,
                    product_id: line.product_id,
                    cost_center_id,
                    budget_id,
                    amount: line.line_total,
                    created_at: now,
                }
            })
            .collect();

        if document.cost_center_id.is_none() {
            document.cost_center_id = records.iter().find_map(|r| r.cost_center_id);
        }

        PostedDocument { document, records }
    }

    fn line_cost_center<R: CostCenterResolver + ?Sized>(
        document: &Document,
        line: &DocumentLine,
        context: &PostingContext<'_, R>,
    ) -> Option<CostCenterId> {
        if let Some(assignment) = context.resolver.resolve(line.product_id, document.contact_id) {
            return Some(assignment.cost_center_id);
        }

        match context.fallback_cost_center_id {
            Some(fallback) => {
                tracing::debug!(
                    document_id = %document.id,
                    product_id = %line.product_id,
                    cost_center_id = %fallback,
                    "No rule matched, using fallback cost center"
                );
                Some(fallback)
            }
            None => {
                tracing::warn!(
                    document_id = %document.id,
                    product_id = %line.product_id,
                    "No rule matched and no fallback cost center configured"
                );
                None
            }
        }
    }
}
