//! Document entity model.

use assetdesk_core::types::{AssetId, DocumentId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A file reference attached to an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique document identifier.
    pub id: DocumentId,
    /// The asset this document belongs to.
    pub asset_id: AssetId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Where the file can be downloaded from.
    pub file_url: String,
    /// MIME type or extension.
    pub file_type: String,
    /// Who uploaded it.
    pub uploaded_by_id: UserId,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
    /// When the document was last updated.
    pub updated_at: DateTime<Utc>,
}
