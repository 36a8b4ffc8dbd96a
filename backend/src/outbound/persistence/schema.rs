//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Registered accounts. `username` carries a unique index.
    users (id) {
        id -> Uuid,
        #[max_length = 20]
        username -> Varchar,
        password_hash -> Text,
        age -> Int4,
        #[max_length = 16]
        role -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only chat log.
    messages (id) {
        id -> Uuid,
        sender_id -> Uuid,
        receiver_id -> Uuid,
        content -> Text,
        sent_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, messages);
