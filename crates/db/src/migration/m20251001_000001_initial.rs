//! Initial database migration.
//!
//! Creates the enums, reference tables, matching tables, budget tables and
//! document tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: REFERENCE DATA
        // ============================================================
        db.execute_unprepared(COST_CENTERS_SQL).await?;
        db.execute_unprepared(PARTNER_TAGS_SQL).await?;
        db.execute_unprepared(CONTACTS_SQL).await?;
        db.execute_unprepared(PRODUCTS_SQL).await?;

        // ============================================================
        // PART 3: COST CENTER MATCHING
        // ============================================================
        db.execute_unprepared(MATCHING_MODELS_SQL).await?;
        db.execute_unprepared(LEGACY_RULES_SQL).await?;

        // ============================================================
        // PART 4: BUDGETS
        // ============================================================
        db.execute_unprepared(BUDGETS_SQL).await?;
        db.execute_unprepared(BUDGET_LINES_SQL).await?;

        // ============================================================
        // PART 5: DOCUMENTS
        // ============================================================
        db.execute_unprepared(DOCUMENTS_SQL).await?;
        db.execute_unprepared(DOCUMENT_LINES_SQL).await?;
        db.execute_unprepared(TRANSACTION_RECORDS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
CREATE TYPE contact_type AS ENUM ('customer', 'vendor', 'both');

CREATE TYPE model_status AS ENUM ('draft', 'confirmed', 'cancelled');

CREATE TYPE rule_kind AS ENUM ('product', 'category');

CREATE TYPE budget_status AS ENUM (
    'draft',
    'active',
    'confirmed',
    'revised',
    'cancelled'
);

CREATE TYPE budget_line_type AS ENUM ('income', 'expense');

CREATE TYPE document_type AS ENUM (
    'purchase_order',
    'sales_order',
    'vendor_bill',
    'customer_invoice'
);

CREATE TYPE document_status AS ENUM (
    'draft',
    'pending_vendor',
    'posted',
    'partial',
    'paid',
    'cancelled'
);
";

const COST_CENTERS_SQL: &str = r"
CREATE TABLE cost_centers (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL UNIQUE CHECK (btrim(name) <> ''),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const PARTNER_TAGS_SQL: &str = r"
CREATE TABLE partner_tags (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL UNIQUE CHECK (btrim(name) <> ''),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const CONTACTS_SQL: &str = r"
CREATE TABLE contacts (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL CHECK (btrim(name) <> ''),
    contact_type contact_type NOT NULL,
    tag_id UUID REFERENCES partner_tags(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_contacts_tag ON contacts(tag_id);
";

const PRODUCTS_SQL: &str = r"
CREATE TABLE products (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL CHECK (btrim(name) <> ''),
    category VARCHAR(255),
    price NUMERIC(19, 4) NOT NULL CHECK (price >= 0),
    vendor_id UUID REFERENCES contacts(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_products_category ON products(category);
";

const MATCHING_MODELS_SQL: &str = r"
CREATE TABLE matching_models (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL CHECK (btrim(name) <> ''),
    status model_status NOT NULL DEFAULT 'draft',
    product_id UUID REFERENCES products(id),
    partner_id UUID REFERENCES contacts(id),
    product_category VARCHAR(255),
    partner_tag_id UUID REFERENCES partner_tags(id),
    cost_center_id UUID NOT NULL REFERENCES cost_centers(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_matching_models_status ON matching_models(status, created_at, id);
";

const LEGACY_RULES_SQL: &str = r"
CREATE TABLE legacy_rules (
    id UUID PRIMARY KEY,
    kind rule_kind NOT NULL,
    value VARCHAR(255) NOT NULL CHECK (btrim(value) <> ''),
    cost_center_id UUID NOT NULL REFERENCES cost_centers(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_legacy_rules_lookup ON legacy_rules(kind, value, created_at);
";

const BUDGETS_SQL: &str = r"
CREATE TABLE budgets (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL CHECK (btrim(name) <> ''),
    cost_center_id UUID NOT NULL REFERENCES cost_centers(id),
    amount NUMERIC(19, 4) NOT NULL CHECK (amount >= 0),
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    status budget_status NOT NULL DEFAULT 'draft',
    revised_from_id UUID REFERENCES budgets(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CHECK (start_date <= end_date),
    CHECK (revised_from_id IS NULL OR revised_from_id <> id)
);

CREATE INDEX idx_budgets_cost_center ON budgets(cost_center_id, status);
CREATE UNIQUE INDEX idx_budgets_single_revision ON budgets(revised_from_id)
    WHERE revised_from_id IS NOT NULL;
";

const BUDGET_LINES_SQL: &str = r"
CREATE TABLE budget_lines (
    id UUID PRIMARY KEY,
    budget_id UUID NOT NULL REFERENCES budgets(id) ON DELETE CASCADE,
    matching_model_id UUID NOT NULL REFERENCES matching_models(id),
    line_type budget_line_type NOT NULL,
    budgeted_amount NUMERIC(19, 4) NOT NULL CHECK (budgeted_amount >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_budget_lines_budget ON budget_lines(budget_id);
";

const DOCUMENTS_SQL: &str = r"
CREATE TABLE documents (
    id UUID PRIMARY KEY,
    document_type document_type NOT NULL,
    contact_id UUID NOT NULL REFERENCES contacts(id),
    cost_center_id UUID REFERENCES cost_centers(id),
    total_amount NUMERIC(19, 4) NOT NULL,
    status document_status NOT NULL DEFAULT 'draft',
    source_document_id UUID REFERENCES documents(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CHECK (
        status <> 'pending_vendor'
        OR document_type IN ('purchase_order', 'vendor_bill')
    )
);

CREATE INDEX idx_documents_posted ON documents(status, document_type, cost_center_id, created_at);
";

const DOCUMENT_LINES_SQL: &str = r"
CREATE TABLE document_lines (
    id UUID PRIMARY KEY,
    document_id UUID NOT NULL REFERENCES documents(id) ON DELETE CASCADE,
    line_no INTEGER NOT NULL,
    product_id UUID NOT NULL REFERENCES products(id),
    quantity NUMERIC(19, 4) NOT NULL CHECK (quantity > 0),
    unit_price NUMERIC(19, 4) NOT NULL CHECK (unit_price >= 0),
    line_total NUMERIC(19, 4) NOT NULL,
    UNIQUE (document_id, line_no)
);
";

const TRANSACTION_RECORDS_SQL: &str = r"
CREATE TABLE transaction_records (
    id UUID PRIMARY KEY,
    document_id UUID NOT NULL REFERENCES documents(id),
    document_line_id UUID NOT NULL REFERENCES document_lines(id),
    product_id UUID NOT NULL REFERENCES products(id),
    cost_center_id UUID REFERENCES cost_centers(id),
    budget_id UUID REFERENCES budgets(id),
    amount NUMERIC(19, 4) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (document_line_id)
);

CREATE INDEX idx_transaction_records_document ON transaction_records(document_id);
CREATE INDEX idx_transaction_records_cost_center ON transaction_records(cost_center_id, created_at);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS transaction_records CASCADE;
DROP TABLE IF EXISTS document_lines CASCADE;
DROP TABLE IF EXISTS documents CASCADE;
DROP TABLE IF EXISTS budget_lines CASCADE;
DROP TABLE IF EXISTS budgets CASCADE;
DROP TABLE IF EXISTS legacy_rules CASCADE;
DROP TABLE IF EXISTS matching_models CASCADE;
DROP TABLE IF EXISTS products CASCADE;
DROP TABLE IF EXISTS contacts CASCADE;
DROP TABLE IF EXISTS partner_tags CASCADE;
DROP TABLE IF EXISTS cost_centers CASCADE;

DROP TYPE IF EXISTS document_status CASCADE;
DROP TYPE IF EXISTS document_type CASCADE;
DROP TYPE IF EXISTS budget_line_type CASCADE;
DROP TYPE IF EXISTS budget_status CASCADE;
DROP TYPE IF EXISTS rule_kind CASCADE;
DROP TYPE IF EXISTS model_status CASCADE;
DROP TYPE IF EXISTS contact_type CASCADE;
";
