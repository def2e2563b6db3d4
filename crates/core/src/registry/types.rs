//! Classification entities: tags and categories.

use std::fmt::Display;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use fintrack_shared::types::{CategoryId, TagId, TenantId, UserId};
use serde::{Deserialize, Serialize};

use crate::fields::FieldErrors;

/// Maximum length of a classification name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Common behaviour of tenant-scoped classification labels.
///
/// Tags and categories share one lifecycle: created with audit stamps,
/// updated with a new `updated_by`, and soft-deleted via `deactivated_at`.
pub trait Classification: Clone + Send + Sync + 'static {
    /// Typed identifier.
    type Id: Copy + Eq + Hash + Display + Send + Sync + 'static;
    /// Caller-editable fields.
    type Draft: Clone + Send + Sync + 'static;

    /// Entity name used in logs and error messages.
    const KIND: &'static str;

    /// The entity's identifier.
    fn id(&self) -> Self::Id;

    /// The owning tenant.
    fn tenant_id(&self) -> TenantId;

    /// Structural checks on a draft. Returns every violation found.
    fn validate(draft: &Self::Draft) -> FieldErrors;
}

/// A draft stamped with the tenant and acting user taken from the context.
///
/// Stores build audit columns from these fields only; nothing caller-supplied
/// reaches `tenant_id`, `created_by` or `updated_by`.
#[derive(Debug, Clone)]
pub struct Stamped<D> {
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Acting user (becomes `created_by` and/or `updated_by`).
    pub acting_user: UserId,
    /// Editable fields.
    pub draft: D,
}

/// A label attached to transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag ID.
    pub id: TagId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Display name.
    pub name: String,
    /// User who created the tag.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// User who last changed the tag.
    pub updated_by: UserId,
    /// Last change timestamp.
    pub updated_at: DateTime<Utc>,
    /// Set when the tag is soft-deleted.
    pub deactivated_at: Option<DateTime<Utc>>,
}

/// Editable tag fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagDraft {
    /// Display name (required).
    pub name: String,
}

/// A category, optionally nested under a parent category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Parent category, if nested.
    pub parent_category_id: Option<CategoryId>,
    /// Display name.
    pub name: String,
    /// Display colour (free-form, may be empty).
    pub color: String,
    /// Display icon (free-form, may be empty).
    pub icon: String,
    /// User who created the category.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// User who last changed the category.
    pub updated_by: UserId,
    /// Last change timestamp.
    pub updated_at: DateTime<Utc>,
    /// Set when the category is soft-deleted.
    pub deactivated_at: Option<DateTime<Utc>>,
}

/// Editable category fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryDraft {
    /// Display name (required).
    pub name: String,
    /// Parent category.
    #[serde(default)]
    pub parent_category_id: Option<CategoryId>,
    /// Display colour.
    #[serde(default)]
    pub color: String,
    /// Display icon.
    #[serde(default)]
    pub icon: String,
}

fn validate_name(name: &str, errors: &mut FieldErrors) {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        errors.add("name", "is required");
    } else if trimmed.chars().count() > MAX_NAME_LEN {
        errors.add("name", format!("must be at most {MAX_NAME_LEN} characters"));
    }
}

impl Classification for Tag {
    type Id = TagId;
    type Draft = TagDraft;

    const KIND: &'static str = "tag";

    fn id(&self) -> TagId {
        self.id
    }

    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    fn validate(draft: &TagDraft) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validate_name(&draft.name, &mut errors);
        errors
    }
}

impl Classification for Category {
    type Id = CategoryId;
    type Draft = CategoryDraft;

    const KIND: &'static str = "category";

    fn id(&self) -> CategoryId {
        self.id
    }

    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    fn validate(draft: &CategoryDraft) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validate_name(&draft.name, &mut errors);
        if draft.parent_category_id.is_some_and(|id| id.is_nil()) {
            errors.add("parent_category_id", "must be a valid category id");
        }
        errors
    }
}
