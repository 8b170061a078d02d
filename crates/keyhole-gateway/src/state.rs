use std::sync::Arc;

use keyhole_core::{BulkImporter, Resolver};

#[derive(Clone)]
pub struct AppState {
    importer: Arc<dyn BulkImporter>,
    resolver: Arc<dyn Resolver>,
}

impl AppState {
    pub fn new(importer: Arc<dyn BulkImporter>, resolver: Arc<dyn Resolver>) -> Self {
        Self { importer, resolver }
    }

    pub fn importer(&self) -> &dyn BulkImporter {
        self.importer.as_ref()
    }

    pub fn resolver(&self) -> &dyn Resolver {
        self.resolver.as_ref()
    }
}
