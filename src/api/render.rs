//! Table rendering handler
//!
//! Serves a read-only HTML view of a company table document.

use crate::error::RenderError;
use crate::services::render::RenderService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::Html,
};
use std::collections::HashMap;
use std::sync::Arc;

/// GET /render?file=<name>.json - Render a table document as HTML
pub async fn render_companies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>, RenderError> {
    let file = params
        .get("file")
        .filter(|name| !name.is_empty())
        .ok_or(RenderError::MissingFile)?;

    let table = RenderService::load_table(&state.render_dir, file).await?;

    if table.rows.is_empty() {
        return Ok(Html(RenderService::message_page(
            "No trucking companies found in the JSON file",
        )));
    }

    tracing::debug!(file = %file, rows = table.rows.len(), "Rendering company table");
    Ok(Html(RenderService::render_page(&table)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CompanyStore;
    use serde_json::json;
    use tempfile::{tempdir, TempDir};

    fn create_test_state() -> (TempDir, Arc<AppState>) {
        let dir = tempdir().unwrap();
        let store = CompanyStore::new(dir.path().join("truckinglist.json"));
        let state = Arc::new(AppState::new(store, dir.path()));
        (dir, state)
    }

    fn query(file: &str) -> Query<HashMap<String, String>> {
        Query(HashMap::from([("file".to_string(), file.to_string())]))
    }

    #[tokio::test]
    async fn test_render_without_file_parameter() {
        let (_dir, state) = create_test_state();
        let result = render_companies(State(state), Query(HashMap::new())).await;
        assert!(matches!(result, Err(RenderError::MissingFile)));
    }

    #[tokio::test]
    async fn test_render_rejects_traversal_before_reading() {
        let (_dir, state) = create_test_state();
        let result = render_companies(State(state), query("../secrets.json")).await;
        assert!(matches!(result, Err(RenderError::InvalidFilename)));
    }

    #[tokio::test]
    async fn test_render_no_rows() {
        let (dir, state) = create_test_state();
        std::fs::write(
            dir.path().join("empty.json"),
            json!({"Mainline": {"Table": {"Row": []}}}).to_string(),
        )
        .unwrap();

        let Html(page) = render_companies(State(state), query("empty.json"))
            .await
            .unwrap();
        assert!(page.contains("No trucking companies found in the JSON file"));
    }

    #[tokio::test]
    async fn test_render_table_page() {
        let (dir, state) = create_test_state();
        std::fs::write(
            dir.path().join("trucking.json"),
            json!({"Mainline": {"Table": {"Row": [{
                "Company": "Knight-Swift",
                "Services": "Truckload, LTL",
                "Hubs": {"Hub": ["Phoenix, AZ"]},
                "Revenue": "7100",
                "HomePage": "https://knight-swift.com",
                "Logo": ""
            }]}}})
            .to_string(),
        )
        .unwrap();

        let Html(page) = render_companies(State(state), query("trucking.json"))
            .await
            .unwrap();
        assert!(page.contains("<th>Parent Company</th>"));
        assert!(page.contains("<td>Knight-Swift</td>"));
        assert!(page.contains("<td>Phoenix, AZ</td>"));
    }
}
