use crate::config::FetchConfig;
use crate::data::catalog::Catalog;
use crate::data::error::ImportError;
use crate::data::filter::filtered_indices;
use crate::data::model::{Filters, Product};
use crate::data::pager::{self, PageItem, PAGE_SIZE};
use crate::import::{spawn_import, ImportSource, PendingImport};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Filtered view, remembered together with the inputs it was derived from.
struct View {
    revision: u64,
    filters: Filters,
    indices: Vec<usize>,
}

/// The full session state, independent of rendering.
pub struct AppState {
    /// Imported products (empty until the first successful import).
    catalog: Catalog,

    /// Bumped whenever `catalog` is replaced.
    revision: u64,

    /// Current query configuration.
    filters: Filters,

    /// 1-based page into the filtered view.
    page: usize,

    /// Indices of products passing the current filters, in display order.
    view: View,

    /// Import running in the background, if any.
    pending: Option<PendingImport>,

    /// User-facing message for the last failed import.
    pub status_message: Option<String>,

    /// Shared-sheet link being typed into the import box.
    pub sheet_link: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            catalog: Catalog::default(),
            revision: 0,
            filters: Filters::default(),
            page: 1,
            view: View {
                revision: 0,
                filters: Filters::default(),
                indices: Vec::new(),
            },
            pending: None,
            status_message: None,
            sheet_link: String::new(),
        }
    }
}

impl AppState {
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Whether an import is in flight. The UI disables its import controls
    /// while this is true.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    // -- Import lifecycle --

    /// Start importing `source` in the background. Refused (returns `false`)
    /// while another import is still pending.
    pub fn begin_import(&mut self, source: ImportSource, config: &FetchConfig) -> bool {
        if self.is_loading() {
            log::warn!("Ignoring import of {source}: another import is still running");
            return false;
        }
        log::info!("Importing {source}");
        self.status_message = None;
        self.pending = Some(spawn_import(source, config.clone()));
        true
    }

    /// Poll the pending import. Returns `true` when it finished during this
    /// call (successfully or not).
    pub fn poll_import(&mut self) -> bool {
        let Some(result) = self.pending.as_ref().and_then(PendingImport::try_finish) else {
            return false;
        };
        self.finish_import(result);
        true
    }

    /// Commit the outcome of an import. Success replaces the catalog
    /// wholesale; failure keeps the previous catalog untouched.
    pub fn finish_import(&mut self, result: Result<Vec<Product>, ImportError>) {
        let source = self
            .pending
            .take()
            .map(|p| p.source().to_string())
            .unwrap_or_else(|| "catalog".to_string());

        match result {
            Ok(products) => {
                log::info!("Imported {} products from {source}", products.len());
                self.set_catalog(products);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to import {source}: {e:#}");
                self.status_message = Some(e.user_message().to_string());
            }
        }
    }

    /// Replace the catalog, reset filters and go back to page 1.
    pub fn set_catalog(&mut self, products: Vec<Product>) {
        self.catalog = Catalog::from_products(products);
        self.revision += 1;
        self.filters = Filters::default();
        self.page = 1;
        self.refilter();
    }

    // -- Filters --

    /// Mutate the filters. Any actual change sends the view back to page 1.
    pub fn update_filters(&mut self, change: impl FnOnce(&mut Filters)) {
        let before = self.filters.clone();
        change(&mut self.filters);
        if self.filters != before {
            self.page = 1;
            self.refilter();
        }
    }

    /// Restore default filters and sorting, and go back to page 1.
    pub fn clear_filters(&mut self) {
        self.filters = Filters::default();
        self.page = 1;
        self.refilter();
    }

    pub fn has_active_filters(&self) -> bool {
        self.filters.is_active()
    }

    pub fn active_filter_count(&self) -> usize {
        self.filters.active_count()
    }

    /// Recompute the filtered view if the catalog or filters moved on since
    /// it was last derived.
    fn refilter(&mut self) {
        if self.view.revision == self.revision && self.view.filters == self.filters {
            return;
        }
        self.view = View {
            revision: self.revision,
            filters: self.filters.clone(),
            indices: filtered_indices(self.catalog.products(), &self.filters),
        };
    }

    /// Catalog indices passing the current filters, in display order.
    pub fn visible_indices(&self) -> &[usize] {
        &self.view.indices
    }

    pub fn visible_count(&self) -> usize {
        self.view.indices.len()
    }

    // -- Pagination --

    pub fn total_pages(&self) -> usize {
        pager::total_pages(self.visible_count(), PAGE_SIZE)
    }

    /// Jump to `page`, clamped to the available pages.
    pub fn set_page(&mut self, page: usize) {
        self.page = pager::clamp_page(page, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Products on the current page.
    pub fn current_page(&self) -> Vec<&Product> {
        pager::page_slice(self.visible_indices(), self.page, PAGE_SIZE)
            .iter()
            .filter_map(|&i| self.catalog.get(i))
            .collect()
    }

    /// Entries for the page control.
    pub fn page_items(&self) -> Vec<PageItem> {
        pager::page_items(self.page, self.total_pages())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{SortField, SortOrder};

    fn products(n: usize) -> Vec<Product> {
        (0..n)
            .map(|i| Product {
                product_no: format!("P{i:02}"),
                category: if i % 2 == 0 { "Even" } else { "Odd" }.to_string(),
                dp_price: i as f64,
                ..Product::default()
            })
            .collect()
    }

    fn loaded(n: usize) -> AppState {
        let mut state = AppState::default();
        state.finish_import(Ok(products(n)));
        state
    }

    #[test]
    fn empty_state() {
        let state = AppState::default();
        assert!(state.catalog().is_empty());
        assert_eq!(state.total_pages(), 0);
        assert!(state.current_page().is_empty());
        assert!(state.page_items().is_empty());
        assert!(!state.is_loading());
    }

    #[test]
    fn successful_import_replaces_catalog() {
        let mut state = loaded(3);
        state.update_filters(|f| f.search = "p01".into());
        assert_eq!(state.visible_count(), 1);

        state.finish_import(Ok(products(8)));
        assert_eq!(state.catalog().len(), 8);
        assert_eq!(state.filters(), &Filters::default());
        assert_eq!(state.visible_count(), 8);
        assert_eq!(state.page(), 1);
        assert_eq!(state.catalog().facets().categories, ["Even", "Odd"]);
    }

    #[test]
    fn failed_import_keeps_previous_catalog() {
        let mut state = loaded(4);
        state.finish_import(Err(ImportError::Empty));
        assert_eq!(state.catalog().len(), 4);
        assert_eq!(state.visible_count(), 4);
        assert_eq!(
            state.status_message.as_deref(),
            Some(ImportError::Empty.user_message())
        );
        assert!(!state.is_loading());

        state.finish_import(Ok(products(1)));
        assert_eq!(state.status_message, None);
    }

    #[test]
    fn filter_change_resets_page() {
        let mut state = loaded(20);
        state.set_page(3);
        assert_eq!(state.page(), 3);

        state.update_filters(|f| f.category = "Odd".into());
        assert_eq!(state.page(), 1);
        assert_eq!(state.visible_count(), 10);
    }

    #[test]
    fn no_op_update_keeps_page() {
        let mut state = loaded(20);
        state.set_page(2);
        state.update_filters(|f| f.search.clear());
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn clear_restores_defaults_and_first_page() {
        let mut state = loaded(20);
        state.update_filters(|f| {
            f.search = "p".into();
            f.max_dp_price = "15".into();
            f.sort_by = SortField::DpPrice;
            f.sort_order = SortOrder::Desc;
        });
        state.set_page(2);
        assert!(state.has_active_filters());
        assert_eq!(state.active_filter_count(), 2);

        state.clear_filters();
        assert_eq!(state.page(), 1);
        assert_eq!(state.filters(), &Filters::default());
        assert_eq!(state.filters().sort_by, SortField::ProductNo);
        assert_eq!(state.filters().sort_order, SortOrder::Asc);
        assert_eq!(state.visible_count(), 20);
    }

    #[test]
    fn paging_is_clamped() {
        let mut state = loaded(13);
        assert_eq!(state.total_pages(), 3);
        state.prev_page();
        assert_eq!(state.page(), 1);
        state.next_page();
        state.next_page();
        state.next_page();
        assert_eq!(state.page(), 3);
        assert_eq!(state.current_page().len(), 1);
        state.set_page(99);
        assert_eq!(state.page(), 3);
        state.set_page(0);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn current_page_follows_sort_order() {
        let mut state = loaded(10);
        state.update_filters(|f| {
            f.sort_by = SortField::DpPrice;
            f.sort_order = SortOrder::Desc;
        });
        let first: Vec<&str> = state
            .current_page()
            .iter()
            .map(|p| p.product_no.as_str())
            .collect();
        assert_eq!(first, ["P09", "P08", "P07", "P06", "P05", "P04"]);
    }

    #[test]
    fn second_import_refused_while_pending() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.csv");
        std::fs::write(&path, "product_no\nA\nB\n").unwrap();

        let mut state = AppState::default();
        let config = FetchConfig::default();
        assert!(state.begin_import(ImportSource::File(path.clone()), &config));
        assert!(state.is_loading());
        assert!(!state.begin_import(ImportSource::File(path), &config));

        while !state.poll_import() {
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert!(!state.is_loading());
        assert_eq!(state.catalog().len(), 2);
    }
}
