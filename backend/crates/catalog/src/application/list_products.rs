//! List Products Use Case
//!
//! Paginated listing with optional relevance search.

use std::sync::Arc;

use kernel::pagination::{Page, PageRequest};

use crate::application::config::CatalogConfig;
use crate::domain::entity::product::Product;
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::SearchQuery;
use crate::error::CatalogResult;

/// Raw query-string values
#[derive(Debug, Clone, Default)]
pub struct ListProductsInput {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

/// List products use case
pub struct ListProductsUseCase<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
    config: Arc<CatalogConfig>,
}

impl<R> ListProductsUseCase<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<CatalogConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: ListProductsInput) -> CatalogResult<Page<Product>> {
        let request = PageRequest::from_query(
            input.page.as_deref(),
            input.limit.as_deref(),
            self.config.default_page_size,
            self.config.max_page_size,
        )?;
        let search = SearchQuery::parse(input.search.as_deref());

        let (items, total) = match &search {
            // Nothing searchable: matches nothing
            Some(query) if !query.has_terms() => (Vec::new(), 0),
            _ => self.repo.list(request, search.as_ref()).await?,
        };

        tracing::debug!(
            page = request.page(),
            page_size = request.page_size(),
            search = search.is_some(),
            total,
            "Products listed"
        );

        Ok(Page::new(items, total, request))
    }
}
