mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::{json, Value};

use common::TestApp;
use kanban_api_rust::database::ColumnRepository;

fn ids(result: &Value) -> Vec<i64> {
    result
        .as_array()
        .expect("array result")
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn get_columns_is_sorted_by_position() -> Result<()> {
    let app = TestApp::spawn().await?;
    let response = app
        .call(&app.viewer(), "getColumns", json!({"project_id": app.project_id}))
        .await?;

    let positions: Vec<i64> = response["result"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["position"].as_i64().unwrap())
        .collect();
    assert_eq!(positions, vec![1, 2, 3, 4]);
    Ok(())
}

#[tokio::test]
async fn add_then_list_includes_new_column() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.manager();

    let added = app
        .call(&token, "addColumn", json!([app.project_id, "title", 0, ""]))
        .await?;
    let column_id = added["result"].as_i64().expect("new column id");

    let listed = app
        .call(&token, "getColumns", json!({"project_id": app.project_id}))
        .await?;
    let column = listed["result"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["id"] == column_id)
        .cloned()
        .expect("column listed");

    assert_eq!(column["title"], "title");
    assert_eq!(column["task_limit"], 0);
    assert_eq!(column["position"], 5);
    assert_eq!(column["project_id"], app.project_id);
    Ok(())
}

#[tokio::test]
async fn add_column_duplicate_title_is_an_error_object() -> Result<()> {
    let app = TestApp::spawn().await?;
    let response = app
        .call(&app.manager(), "addColumn", json!({"project_id": app.project_id, "title": "Backlog"}))
        .await?;

    assert!(response.get("result").is_none());
    assert_eq!(response["error"]["code"], -32000);
    Ok(())
}

#[tokio::test]
async fn update_column_with_defaults() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.manager();
    let column_id = app.store.get_all(app.project_id).await?[1].id;

    let updated = app
        .call(&token, "updateColumn", json!({"column_id": column_id, "title": "Up next"}))
        .await?;
    assert_eq!(updated["result"], true);

    let fetched = app.call(&token, "getColumn", json!([column_id])).await?;
    assert_eq!(fetched["result"]["title"], "Up next");
    assert_eq!(fetched["result"]["task_limit"], 0);
    assert_eq!(fetched["result"]["description"], "");
    Ok(())
}

#[tokio::test]
async fn remove_column_drops_it_and_its_tasks() -> Result<()> {
    let app = TestApp::spawn().await?;
    let column_id = app.store.get_all(app.project_id).await?[2].id;
    app.store.add_task(column_id, "half done").await.unwrap();

    let removed = app
        .call(&app.manager(), "removeColumn", json!({"column_id": column_id}))
        .await?;
    assert_eq!(removed["result"], true);
    assert!(app.store.tasks_in_column(column_id).await.is_empty());

    let fetched = app
        .call(&app.app_token(), "getColumn", json!({"column_id": column_id}))
        .await?;
    assert_eq!(fetched["result"], Value::Null);

    let listed = app
        .call(&app.manager(), "getColumns", json!({"project_id": app.project_id}))
        .await?;
    assert_eq!(ids(&listed["result"]).len(), 3);
    Ok(())
}

#[tokio::test]
async fn change_position_keeps_relative_order() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.manager();
    let before: Vec<i64> = app.store.get_all(app.project_id).await?.iter().map(|c| c.id).collect();

    let moved = app
        .call(
            &token,
            "changeColumnPosition",
            json!({"project_id": app.project_id, "column_id": before[0], "position": 4}),
        )
        .await?;
    assert_eq!(moved["result"], true);

    let listed = app
        .call(&token, "getColumns", json!({"project_id": app.project_id}))
        .await?;
    assert_eq!(ids(&listed["result"]), vec![before[1], before[2], before[3], before[0]]);
    Ok(())
}

#[tokio::test]
async fn change_position_out_of_range_returns_false() -> Result<()> {
    let app = TestApp::spawn().await?;
    let column_id = app.store.get_all(app.project_id).await?[0].id;

    let moved = app
        .call(&app.manager(), "changeColumnPosition", json!([app.project_id, column_id, 9]))
        .await?;
    assert_eq!(moved["result"], false);
    Ok(())
}

#[tokio::test]
async fn viewer_mutations_are_forbidden_and_change_nothing() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.viewer();
    let before = app.store.get_all(app.project_id).await?;
    let column_id = before[0].id;

    let attempts = [
        ("addColumn", json!({"project_id": app.project_id, "title": "Sneaky"})),
        ("updateColumn", json!({"column_id": column_id, "title": "Renamed"})),
        ("removeColumn", json!({"column_id": column_id})),
        (
            "changeColumnPosition",
            json!({"project_id": app.project_id, "column_id": column_id, "position": 2}),
        ),
    ];

    for (method, params) in attempts {
        let response = app.call(&token, method, params).await?;
        assert_eq!(response["error"]["code"], 403, "{} should be forbidden", method);
        assert_eq!(response["error"]["message"], "Forbidden");
    }

    assert_eq!(app.store.get_all(app.project_id).await?, before);
    Ok(())
}

#[tokio::test]
async fn strangers_cannot_read() -> Result<()> {
    let app = TestApp::spawn().await?;
    let column_id = app.store.get_all(app.project_id).await?[0].id;
    let token = app.stranger();

    let listed = app
        .call(&token, "getColumns", json!({"project_id": app.project_id}))
        .await?;
    assert_eq!(listed["error"]["code"], 403);

    let fetched = app.call(&token, "getColumn", json!({"column_id": column_id})).await?;
    assert_eq!(fetched["error"]["code"], 403);
    Ok(())
}

#[tokio::test]
async fn unknown_column_is_null_for_app_callers_and_forbidden_for_users() -> Result<()> {
    let app = TestApp::spawn().await?;

    let as_app = app
        .call(&app.app_token(), "getColumn", json!({"column_id": 9999}))
        .await?;
    assert_eq!(as_app["result"], Value::Null);

    let as_user = app
        .call(&app.manager(), "getColumn", json!({"column_id": 9999}))
        .await?;
    assert_eq!(as_user["error"]["code"], 403);
    Ok(())
}

#[tokio::test]
async fn invalid_params_are_reported() -> Result<()> {
    let app = TestApp::spawn().await?;
    let response = app
        .call(&app.manager(), "changeColumnPosition", json!([app.project_id]))
        .await?;
    assert_eq!(response["error"]["code"], -32602);
    Ok(())
}

#[tokio::test]
async fn batch_of_notifications_returns_no_content() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.manager();
    let (status, body) = app
        .post(
            Some(&token),
            json!([
                {"jsonrpc": "2.0", "method": "addColumn", "params": [app.project_id, "Fire and forget"]},
                {"jsonrpc": "2.0", "method": "getColumns", "params": [app.project_id]}
            ]),
        )
        .await?;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_none());
    assert_eq!(app.store.get_all(app.project_id).await?.len(), 5);
    Ok(())
}

#[tokio::test]
async fn batch_over_limit_is_rejected() -> Result<()> {
    let app = TestApp::spawn().await?;
    let batch: Vec<Value> = (0..6)
        .map(|i| json!({"jsonrpc": "2.0", "method": "getColumns", "params": [app.project_id], "id": i}))
        .collect();

    let (status, body) = app.post(Some(&app.manager()), Value::Array(batch)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["error"]["code"], -32600);
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() -> Result<()> {
    let app = TestApp::spawn().await?;
    let (status, body) = app.post_raw(Some(&app.manager()), "{\"jsonrpc\": ").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.unwrap()["error"]["code"], -32700);
    Ok(())
}
