//! Diesel table definitions for the catalogue schema.
//!
//! These definitions must match `migrations/` exactly. Regenerate with
//! `diesel print-schema` or update by hand when a migration changes.

diesel::table! {
    /// Catalogue items.
    sock (sock_id) {
        sock_id -> Varchar,
        name -> Varchar,
        description -> Varchar,
        price -> Float4,
        count -> Int4,
        /// Primary image path; empty when absent.
        image_url_1 -> Varchar,
        /// Secondary image path; empty when absent.
        image_url_2 -> Varchar,
    }
}

diesel::table! {
    /// Tag vocabulary; names are unique.
    tag (tag_id) {
        tag_id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    /// Many-to-many link between socks and tags.
    sock_tag (sock_id, tag_id) {
        sock_id -> Varchar,
        tag_id -> Int4,
    }
}

diesel::joinable!(sock_tag -> sock (sock_id));
diesel::joinable!(sock_tag -> tag (tag_id));

diesel::allow_tables_to_appear_in_same_query!(sock, sock_tag, tag);
