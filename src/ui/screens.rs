use std::path::PathBuf;

use crate::models::Book;

/// Selector state for the remove action: the current titles plus a cursor.
pub(crate) struct RemoveScreen {
    pub(crate) titles: Vec<String>,
    pub(crate) selected: usize,
}

impl RemoveScreen {
    pub(crate) fn new(titles: Vec<String>) -> Self {
        Self {
            titles,
            selected: 0,
        }
    }

    pub(crate) fn current_title(&self) -> Option<&String> {
        self.titles.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.titles.is_empty() {
            return;
        }
        let len = self.titles.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        if !self.titles.is_empty() {
            self.selected = 0;
        }
    }

    pub(crate) fn select_last(&mut self) {
        if !self.titles.is_empty() {
            self.selected = self.titles.len() - 1;
        }
    }

    /// Replace the titles after a deletion and keep the cursor in bounds.
    pub(crate) fn set_titles(&mut self, titles: Vec<String>) {
        self.titles = titles;
        if self.titles.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.titles.len() {
            self.selected = self.titles.len() - 1;
        }
    }
}

/// State for the search action. `searched` distinguishes "no query run yet"
/// from "the last query matched nothing" so the two render differently.
pub(crate) struct SearchScreen {
    pub(crate) query: String,
    pub(crate) results: Vec<Book>,
    pub(crate) searched: bool,
    pub(crate) selected: usize,
}

impl SearchScreen {
    pub(crate) fn new() -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            searched: false,
            selected: 0,
        }
    }

    /// Install the results of a fresh query, resetting the cursor.
    pub(crate) fn set_results(&mut self, results: Vec<Book>) {
        self.results = results;
        self.searched = true;
        self.selected = 0;
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.results.is_empty() {
            return;
        }
        let len = self.results.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }
}

/// Scrollable listing of the whole catalog.
pub(crate) struct ViewScreen {
    pub(crate) books: Vec<Book>,
    pub(crate) selected: usize,
}

impl ViewScreen {
    pub(crate) fn new(books: Vec<Book>) -> Self {
        Self {
            books,
            selected: 0,
        }
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.books.is_empty() {
            return;
        }
        let len = self.books.len() as isize;
        let mut new = self.selected as isize + offset;
        if new < 0 {
            new = 0;
        }
        if new >= len {
            new = len - 1;
        }
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        if !self.books.is_empty() {
            self.selected = 0;
        }
    }

    pub(crate) fn select_last(&mut self) {
        if !self.books.is_empty() {
            self.selected = self.books.len() - 1;
        }
    }
}

/// State for the export action: how many records would be written and where.
pub(crate) struct ExportScreen {
    pub(crate) count: usize,
    pub(crate) path: PathBuf,
}

impl ExportScreen {
    pub(crate) fn new(count: usize, path: PathBuf) -> Self {
        Self { count, path }
    }
}
