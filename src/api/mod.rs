//! Resource API modules.
//!
//! One accessor per REST resource, each a thin view over a shared
//! [`ApiClient`]. Every method maps to exactly one endpoint call with no
//! validation, batching or caching.
//!
//! | Accessor | Resource | Base path |
//! |----------|----------|-----------|
//! | [`ApiClient::briefs`] | [`BriefsApi`] | `/briefs` |
//! | [`ApiClient::sections`] | [`SectionsApi`] | `/sections` |
//! | [`ApiClient::documents`] | [`DocumentsApi`] | `/documents` |
//! | [`ApiClient::ai`] | [`AiApi`] | `/ai` |

mod ai;
mod briefs;
mod documents;
mod sections;

pub use ai::AiApi;
pub use briefs::{BriefsApi, DEFAULT_EXPORT_FORMAT, DEFAULT_LIMIT};
pub use documents::DocumentsApi;
pub use sections::SectionsApi;

use crate::http::ApiClient;

impl ApiClient {
    pub fn briefs(&self) -> BriefsApi<'_> {
        BriefsApi::new(self)
    }

    pub fn sections(&self) -> SectionsApi<'_> {
        SectionsApi::new(self)
    }

    pub fn documents(&self) -> DocumentsApi<'_> {
        DocumentsApi::new(self)
    }

    pub fn ai(&self) -> AiApi<'_> {
        AiApi::new(self)
    }
}
