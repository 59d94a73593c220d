//! Document repository: entry, posting and payment tracking.

use std::collections::HashMap;

use chrono::Utc;
use costwise_core::documents::{
    Document, DocumentStatus, NewDocument, PostedDocument, PostingContext, PostingError,
    PostingPlan, PostingService, TransactionRecord,
};
use costwise_core::matching::LegacyRuleResolver;
use costwise_core::reference::ReferenceLookup;
use costwise_shared::types::{CostCenterId, DocumentId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use uuid::Uuid;

use super::budget::BudgetRepository;
use super::error::RepositoryError;
use super::matching::MatchingRepository;
use super::reference::ReferenceRepository;
use crate::entities::{
    document_lines, documents, sea_orm_active_enums::DocumentStatus as DbDocumentStatus,
    transaction_records,
};
use crate::mapping::{document_from_parts, document_line_models};

/// A document with the transaction records posting appended for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentDetails {
    /// The document and its lines.
    pub document: Document,
    /// Records in line order.
    pub records: Vec<TransactionRecord>,
}

/// Document repository.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    db: DatabaseConnection,
}

impl DocumentRepository {
    /// Creates a new document repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads every document with the given status, lines included.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub async fn load_with_status<C: ConnectionTrait>(
        conn: &C,
        status: DocumentStatus,
    ) -> Result<Vec<Document>, DbErr> {
        let headers = documents::Entity::find()
            .filter(documents::Column::Status.eq(DbDocumentStatus::from(status)))
            .order_by_asc(documents::Column::CreatedAt)
            .order_by_asc(documents::Column::Id)
            .all(conn)
            .await?;
        Self::attach_lines(conn, headers).await
    }

    async fn attach_lines<C: ConnectionTrait>(
        conn: &C,
        headers: Vec<documents::Model>,
    ) -> Result<Vec<Document>, DbErr> {
        if headers.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = headers.iter().map(|h| h.id).collect();
        let mut by_document: HashMap<Uuid, Vec<document_lines::Model>> = HashMap::new();
        for line in document_lines::Entity::find()
            .filter(document_lines::Column::DocumentId.is_in(ids))
            .all(conn)
            .await?
        {
            by_document.entry(line.document_id).or_default().push(line);
        }

        Ok(headers
            .into_iter()
            .map(|header| {
                let lines = by_document.remove(&header.id).unwrap_or_default();
                document_from_parts(header, lines)
            })
            .collect())
    }

    async fn find<C: ConnectionTrait>(
        conn: &C,
        id: DocumentId,
    ) -> Result<Document, RepositoryError> {
        let header = documents::Entity::find_by_id(id.into_inner())
            .one(conn)
            .await?
            .ok_or(PostingError::NotFound(id))?;
        let lines = document_lines::Entity::find()
            .filter(document_lines::Column::DocumentId.eq(header.id))
            .all(conn)
            .await?;
        Ok(document_from_parts(header, lines))
    }

    async fn insert_document<C: ConnectionTrait>(
        conn: &C,
        document: &Document,
    ) -> Result<(), DbErr> {
        documents::ActiveModel::from(document).insert(conn).await?;
        document_lines::Entity::insert_many(document_line_models(document))
            .exec(conn)
            .await?;
        Ok(())
    }

    async fn insert_records<C: ConnectionTrait>(
        conn: &C,
        records: &[TransactionRecord],
    ) -> Result<(), DbErr> {
        if records.is_empty() {
            return Ok(());
        }
        transaction_records::Entity::insert_many(
            records.iter().map(transaction_records::ActiveModel::from),
        )
        .exec(conn)
        .await?;
        Ok(())
    }

    /// Creates a draft (or pending vendor) document.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, the contact, a product or the
    /// header cost center does not exist, or the insert fails.
    pub async fn create_document(&self, input: NewDocument) -> Result<Document, RepositoryError> {
        let document = Document::new(input, Utc::now())?;
        let references = ReferenceRepository::load(&self.db).await?;

        if references.contact(document.contact_id).is_none() {
            return Err(RepositoryError::missing("Contact", document.contact_id));
        }
        if let Some(cost_center_id) = document.cost_center_id {
            if references.cost_center(cost_center_id).is_none() {
                return Err(RepositoryError::missing("Cost center", cost_center_id));
            }
        }
        if let Some(line) = document
            .lines
            .iter()
            .find(|l| references.product(l.product_id).is_none())
        {
            return Err(RepositoryError::missing("Product", line.product_id));
        }

        let txn = self.db.begin().await?;
        Self::insert_document(&txn, &document).await?;
        txn.commit().await?;

        tracing::info!(
            document_id = %document.id,
            document_type = %document.document_type,
            status = %document.status,
            lines = document.lines.len(),
            total = %document.total_amount,
            "Document created"
        );
        Ok(document)
    }

    /// Gets a document with its transaction records.
    ///
    /// # Errors
    ///
    /// Returns `PostingError::NotFound` if it does not exist.
    pub async fn get_document(&self, id: DocumentId) -> Result<DocumentDetails, RepositoryError> {
        let document = Self::find(&self.db, id).await?;
        let records = transaction_records::Entity::find()
            .filter(transaction_records::Column::DocumentId.eq(id.into_inner()))
            .all(&self.db)
            .await?;

        let line_order: HashMap<_, _> = document
            .lines
            .iter()
            .enumerate()
            .map(|(index, line)| (line.id, index))
            .collect();
        let mut records: Vec<TransactionRecord> =
            records.into_iter().map(TransactionRecord::from).collect();
        records.sort_by_key(|r| line_order.get(&r.document_line_id).copied());

        Ok(DocumentDetails { document, records })
    }

    /// Posts a document.
    ///
    /// In one transaction: assigns every line through the legacy rules,
    /// falling back to `fallback_cost_center_id`, flips the status with a
    /// compare-and-set, and appends the transaction records. A sales order
    /// also writes its generated customer invoice.
    ///
    /// # Errors
    ///
    /// Returns `PostingError::InvalidTransition` unless the document is open,
    /// or `PostingError::AlreadyPosted` if a concurrent post won.
    pub async fn post(
        &self,
        id: DocumentId,
        fallback_cost_center_id: Option<CostCenterId>,
    ) -> Result<PostingPlan, RepositoryError> {
        let txn = self.db.begin().await?;

        let document = Self::find(&txn, id).await?;
        let references = ReferenceRepository::load(&txn).await?;
        let rules = MatchingRepository::load_rules(&txn).await?;
        let budgets = BudgetRepository::load_confirmed(&txn).await?;

        let resolver = LegacyRuleResolver::new(&rules, &references);
        let context = PostingContext {
            resolver: &resolver,
            fallback_cost_center_id,
            budgets: &budgets,
        };
        let plan = PostingService::post(&document, &context, Utc::now())?;

        let posted = &plan.posted.document;
        let result = documents::Entity::update_many()
            .set(documents::ActiveModel {
                status: Set(posted.status.into()),
                cost_center_id: Set(posted.cost_center_id.map(CostCenterId::into_inner)),
                updated_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .filter(documents::Column::Id.eq(id.into_inner()))
            .filter(documents::Column::Status.eq(DbDocumentStatus::from(document.status)))
            .exec(&txn)
            .await?;

        if result.rows_affected != 1 {
            txn.rollback().await?;
            tracing::warn!(document_id = %id, "Posting lost to a concurrent writer");
            return Err(PostingError::AlreadyPosted(id).into());
        }

        Self::insert_records(&txn, &plan.posted.records).await?;
        if let Some(PostedDocument { document, records }) = &plan.generated_invoice {
            Self::insert_document(&txn, document).await?;
            Self::insert_records(&txn, records).await?;
        }

        txn.commit().await?;

        let unassigned = plan
            .posted
            .records
            .iter()
            .filter(|r| r.cost_center_id.is_none())
            .count();
        tracing::info!(
            document_id = %id,
            records = plan.posted.records.len(),
            unassigned,
            generated_invoice_id = ?plan.generated_invoice.as_ref().map(|i| i.document.id),
            "Posting stored"
        );
        Ok(plan)
    }

    /// Cancels an open document.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid transition or a concurrent update.
    pub async fn cancel(&self, id: DocumentId) -> Result<Document, RepositoryError> {
        self.transition(id, PostingService::cancel).await
    }

    /// Records a partial or full payment on a posted document.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid transition or a concurrent update.
    pub async fn record_payment(
        &self,
        id: DocumentId,
        fully_paid: bool,
    ) -> Result<Document, RepositoryError> {
        self.transition(id, |document| {
            PostingService::record_payment(document, fully_paid)
        })
        .await
    }

    async fn transition<F>(&self, id: DocumentId, apply: F) -> Result<Document, RepositoryError>
    where
        F: FnOnce(&mut Document) -> Result<(), PostingError>,
    {
        let mut document = Self::find(&self.db, id).await?;
        let from = document.status;
        apply(&mut document)?;

        let result = documents::Entity::update_many()
            .set(documents::ActiveModel {
                status: Set(document.status.into()),
                updated_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .filter(documents::Column::Id.eq(id.into_inner()))
            .filter(documents::Column::Status.eq(DbDocumentStatus::from(from)))
            .exec(&self.db)
            .await?;

        if result.rows_affected != 1 {
            return Err(RepositoryError::Conflict(format!(
                "document {id} changed status concurrently"
            )));
        }

        tracing::info!(document_id = %id, %from, to = %document.status, "Document status changed");
        Ok(document)
    }
}
