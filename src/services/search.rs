// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Paginated activity search.
//!
//! [`ActivitySearch`] holds the search form state (title terms or activity
//! types, fitness range, unleveled flag, page cursor) and turns it into one
//! query against an [`ActivityQueryService`]:
//! 1. Title mode sends the raw terms; `+`, `-` and quoted phrases are
//!    interpreted by the server
//! 2. Type mode sends the type names joined with `"and"`
//! 3. Pages are 1-based here and 0-based on the wire
//!
//! Any filter change resets the page to 1 and invalidates the known total.

use crate::config::DEFAULT_PAGE_SIZE;
use crate::error::{AppError, Result};
use crate::models::{ActivityPage, ActivitySummary, FitnessRange, JoinMode, SearchMode};
use async_trait::async_trait;

/// Remote service that answers paginated activity queries.
#[async_trait]
pub trait ActivityQueryService: Send + Sync {
    async fn query_by_title(
        &self,
        terms: &[String],
        fitness_min: i32,
        fitness_max: i32,
        page_offset: u32,
    ) -> Result<ActivityPage>;

    async fn query_by_type(
        &self,
        types: &[String],
        join_mode: JoinMode,
        fitness_min: i32,
        fitness_max: i32,
        page_offset: u32,
    ) -> Result<ActivityPage>;
}

/// Parameters of one outbound page query, captured when it was issued.
#[derive(Debug, Clone, PartialEq)]
pub enum PageQuery {
    Title {
        terms: Vec<String>,
        fitness_min: i32,
        fitness_max: i32,
        page_offset: u32,
    },
    Type {
        types: Vec<String>,
        join_mode: JoinMode,
        fitness_min: i32,
        fitness_max: i32,
        page_offset: u32,
    },
}

impl PageQuery {
    /// Run this query against a service.
    pub async fn execute<S>(&self, service: &S) -> Result<ActivityPage>
    where
        S: ActivityQueryService + ?Sized,
    {
        match self {
            PageQuery::Title {
                terms,
                fitness_min,
                fitness_max,
                page_offset,
            } => {
                service
                    .query_by_title(terms, *fitness_min, *fitness_max, *page_offset)
                    .await
            }
            PageQuery::Type {
                types,
                join_mode,
                fitness_min,
                fitness_max,
                page_offset,
            } => {
                service
                    .query_by_type(types, *join_mode, *fitness_min, *fitness_max, *page_offset)
                    .await
            }
        }
    }
}

/// A page query tagged with the id used to discard stale responses.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub id: u64,
    pub query: PageQuery,
}

/// Search form state and the results of the last applied page.
pub struct ActivitySearch<S> {
    service: S,
    page_size: u32,

    mode: Option<SearchMode>,
    title_terms: Vec<String>,
    activity_types: Vec<String>,
    fitness: FitnessRange,
    include_unleveled: bool,
    current_page: u32,

    results: Vec<ActivitySummary>,
    total_rows: u64,
    total_rows_stale: bool,

    /// Last id handed out by `begin_fetch`.
    last_request_id: u64,
    /// Request whose response may still be applied.
    pending_request_id: Option<u64>,
}

impl<S: ActivityQueryService> ActivitySearch<S> {
    pub fn new(service: S) -> Self {
        Self::with_page_size(service, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(service: S, page_size: u32) -> Self {
        Self {
            service,
            page_size: page_size.max(1),
            mode: None,
            title_terms: Vec::new(),
            activity_types: Vec::new(),
            fitness: FitnessRange::default(),
            include_unleveled: false,
            current_page: 1,
            results: Vec::new(),
            total_rows: 0,
            total_rows_stale: false,
            last_request_id: 0,
            pending_request_id: None,
        }
    }

    // ─── Form State ──────────────────────────────────────────────────────────

    /// Search activity titles for `terms`.
    pub fn set_title_query(&mut self, terms: Vec<String>) {
        self.mode = Some(SearchMode::ByTitle);
        self.title_terms = terms;
        self.filters_changed();
    }

    /// Search for activities having all of `types`.
    pub fn set_type_query(&mut self, types: Vec<String>) {
        let mut unique: Vec<String> = Vec::with_capacity(types.len());
        for name in types {
            if !unique.contains(&name) {
                unique.push(name);
            }
        }

        self.mode = Some(SearchMode::ByActivityType);
        self.activity_types = unique;
        self.filters_changed();
    }

    pub fn set_fitness_range(&mut self, min: i32, max: i32) {
        self.fitness = FitnessRange::new(min, max);
        self.filters_changed();
    }

    pub fn set_include_unleveled(&mut self, include: bool) {
        self.include_unleveled = include;
        self.filters_changed();
    }

    /// Reset the fitness range and the unleveled flag. The query is kept.
    pub fn clear_filters(&mut self) {
        self.fitness = FitnessRange::default();
        self.include_unleveled = false;
        self.filters_changed();
    }

    /// Move to a 1-based page. Bounds against `page_count` are the caller's job.
    pub fn set_current_page(&mut self, page: u32) {
        self.current_page = page.max(1);
        self.pending_request_id = None;
    }

    fn filters_changed(&mut self) {
        self.current_page = 1;
        self.total_rows_stale = true;
        self.pending_request_id = None;
    }

    // ─── Fetching ────────────────────────────────────────────────────────────

    /// Fetch the current page and replace the results with it.
    ///
    /// On error the previous results and total are kept.
    pub async fn fetch_page(&mut self) -> Result<()> {
        let request = self.begin_fetch()?;
        let page = request.query.execute(&self.service).await?;
        self.apply_page(request.id, page);
        Ok(())
    }

    /// Capture the query for the current state and mark it as the latest request.
    pub fn begin_fetch(&mut self) -> Result<PageRequest> {
        let query = self.build_query()?;

        self.last_request_id += 1;
        self.pending_request_id = Some(self.last_request_id);

        tracing::debug!(
            request_id = self.last_request_id,
            query = ?query,
            "Dispatching activity search"
        );

        Ok(PageRequest {
            id: self.last_request_id,
            query,
        })
    }

    /// Apply a response. Returns `false` if a newer request or a state
    /// change has superseded `request_id`, in which case nothing changes.
    pub fn apply_page(&mut self, request_id: u64, page: ActivityPage) -> bool {
        if self.pending_request_id != Some(request_id) {
            tracing::debug!(request_id, "Dropping stale search response");
            return false;
        }

        tracing::debug!(
            request_id,
            items = page.items.len(),
            total_rows = page.total_rows,
            "Applying search page"
        );

        self.pending_request_id = None;
        self.results = page.items;
        self.total_rows = page.total_rows;
        self.total_rows_stale = false;
        true
    }

    fn build_query(&self) -> Result<PageQuery> {
        let mode = self.mode.ok_or(AppError::NoSearchQuery)?;
        let fitness_min = if self.include_unleveled {
            FitnessRange::UNBOUNDED_MIN
        } else {
            self.fitness.min
        };
        let fitness_max = self.fitness.max;
        let page_offset = self.current_page - 1;

        Ok(match mode {
            SearchMode::ByTitle => PageQuery::Title {
                terms: self.title_terms.clone(),
                fitness_min,
                fitness_max,
                page_offset,
            },
            SearchMode::ByActivityType => PageQuery::Type {
                types: self.activity_types.clone(),
                join_mode: JoinMode::And,
                fitness_min,
                fitness_max,
                page_offset,
            },
        })
    }

    // ─── Accessors ───────────────────────────────────────────────────────────

    pub fn mode(&self) -> Option<SearchMode> {
        self.mode
    }

    pub fn title_terms(&self) -> &[String] {
        &self.title_terms
    }

    pub fn activity_types(&self) -> &[String] {
        &self.activity_types
    }

    pub fn fitness_range(&self) -> FitnessRange {
        self.fitness
    }

    pub fn include_unleveled(&self) -> bool {
        self.include_unleveled
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn results(&self) -> &[ActivitySummary] {
        &self.results
    }

    /// Total rows for the current parameters, `None` until a page for them arrives.
    pub fn total_rows(&self) -> Option<u64> {
        (!self.total_rows_stale).then_some(self.total_rows)
    }

    /// Number of pages, or 0 while the total is unknown.
    pub fn page_count(&self) -> u64 {
        self.total_rows()
            .map_or(0, |total| total.div_ceil(u64::from(self.page_size)))
    }

    pub fn service(&self) -> &S {
        &self.service
    }
}
