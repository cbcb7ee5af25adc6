//! SQL schema for the RentZentro SQLite store.
//!
//! Applied on every open; the DDL is idempotent. `PRAGMA user_version`
//! is stamped for future migrations but not yet checked.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS landlords (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    auth_identity TEXT UNIQUE,      -- NULL on legacy rows until backfilled
    name          TEXT,
    email         TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS team_members (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_identity  TEXT NOT NULL,  -- granting landlord's identity;
                                    -- legacy rows stored the numeric id
    member_identity TEXT,           -- NULL until the invitee first resolves
    invite_email    TEXT NOT NULL,
    role            TEXT NOT NULL,  -- 'manager' | 'viewer'
    status          TEXT NOT NULL,  -- 'pending' | 'active' | 'removed'
    invited_at      TEXT,
    accepted_at     TEXT
);

CREATE TABLE IF NOT EXISTS tenants (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_identity TEXT NOT NULL,
    auth_identity  TEXT UNIQUE,
    name           TEXT,
    email          TEXT NOT NULL,
    status         TEXT
);

-- Messages are append-only.
-- The only UPDATE ever issued against this table is the read_at sweep,
-- which transitions read_at from NULL to a value exactly once.
CREATE TABLE IF NOT EXISTS messages (
    id              TEXT PRIMARY KEY,
    owner_identity  TEXT NOT NULL,
    landlord_id     INTEGER,        -- denormalized; NULL for team senders
                                    -- with no landlord row
    tenant_id       INTEGER NOT NULL REFERENCES tenants(id),
    tenant_identity TEXT,
    body            TEXT NOT NULL,
    sender_role     TEXT NOT NULL,  -- 'tenant' | 'landlord' | 'team'
    sender_label    TEXT,
    created_at      TEXT NOT NULL,  -- ISO 8601 UTC; server-assigned
    read_at         TEXT
);

CREATE INDEX IF NOT EXISTS messages_conversation_idx
    ON messages(owner_identity, tenant_id);
CREATE INDEX IF NOT EXISTS messages_created_idx   ON messages(created_at);
CREATE INDEX IF NOT EXISTS tenants_owner_idx      ON tenants(owner_identity);
CREATE INDEX IF NOT EXISTS members_identity_idx   ON team_members(member_identity);
CREATE INDEX IF NOT EXISTS members_email_idx      ON team_members(invite_email);

PRAGMA user_version = 1;
";
