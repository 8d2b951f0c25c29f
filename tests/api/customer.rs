use crate::helper::spawn_app;
use ordering_system::db::drop_database;
use serde_json::{json, Value};

#[tokio::test]
async fn create_customer_returns_201_with_persisted_record() {
    //arrange
    let app = spawn_app().await;

    //act
    let response = app
        .post_json(
            "/customers",
            &json!({"name": "John Doe", "email": "john@example.com"}),
        )
        .await;

    //assert
    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert!(body["id"].as_i64().unwrap() >= 1);
    assert_eq!(body["name"], "John Doe");
    assert_eq!(body["email"], "john@example.com");
    assert!(body["createdAt"].is_string());
    assert!(body["updatedAt"].is_string());
    drop_database(&app.database_name);
}

#[tokio::test]
async fn get_customer_returns_404_with_fixed_message() {
    //arrange
    let app = spawn_app().await;

    //act
    let response = app.get("/customers/9999").await;

    //assert
    assert_eq!(response.status().as_u16(), 404);
    let body = response.text().await.unwrap();
    assert_eq!(body, "Customer not found");
    drop_database(&app.database_name);
}

#[tokio::test]
async fn update_customer_overwrites_fields_absent_from_the_body() {
    //arrange
    let app = spawn_app().await;
    let created: Value = app
        .post_json(
            "/customers",
            &json!({"name": "Jane Doe", "email": "jane@example.com"}),
        )
        .await
        .json()
        .await
        .unwrap();
    let customer_id = created["id"].as_i64().unwrap();

    //act: resend without the email field
    let response = app
        .api_client
        .put(&format!("{}/customers/{}", &app.address, customer_id))
        .json(&json!({"name": "New Name"}))
        .send()
        .await
        .expect("Failed to execute request.");

    //assert: the omitted email is wiped, not preserved
    assert_eq!(response.status().as_u16(), 200);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["name"], "New Name");
    assert_eq!(updated["email"], "");

    let fetched: Value = app
        .get(&format!("/customers/{}", customer_id))
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["name"], "New Name");
    assert_eq!(fetched["email"], "");
    drop_database(&app.database_name);
}

#[tokio::test]
async fn update_customer_returns_404_before_decoding_the_body() {
    //arrange
    let app = spawn_app().await;

    //act: body is not even valid JSON
    let response = app
        .api_client
        .put(&format!("{}/customers/9999", &app.address))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request.");

    //assert
    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(response.text().await.unwrap(), "Customer not found");
    drop_database(&app.database_name);
}

#[tokio::test]
async fn update_customer_returns_400_for_malformed_body() {
    //arrange
    let app = spawn_app().await;
    let created: Value = app
        .post_json("/customers", &json!({"name": "Jane Doe", "email": ""}))
        .await
        .json()
        .await
        .unwrap();
    let customer_id = created["id"].as_i64().unwrap();

    //act
    let response = app
        .api_client
        .put(&format!("{}/customers/{}", &app.address, customer_id))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request.");

    //assert
    assert_eq!(response.status().as_u16(), 400);
    drop_database(&app.database_name);
}

#[tokio::test]
async fn get_customer_includes_its_orders() {
    //arrange
    let app = spawn_app().await;
    let created: Value = app
        .post_json(
            "/customers",
            &json!({"name": "John Doe", "email": "john@example.com"}),
        )
        .await
        .json()
        .await
        .unwrap();
    let customer_id = created["id"].as_i64().unwrap();

    let order_response = app
        .post_json(
            "/orders",
            &json!({"orderNumber": "ORD900", "customerId": customer_id}),
        )
        .await;
    assert_eq!(order_response.status().as_u16(), 201);

    //act
    let body: Value = app
        .get(&format!("/customers/{}", customer_id))
        .await
        .json()
        .await
        .unwrap();

    //assert
    let orders = body["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["orderNumber"], "ORD900");
    assert_eq!(orders[0]["customerId"].as_i64().unwrap(), customer_id);
    drop_database(&app.database_name);
}

#[tokio::test]
async fn list_customers_filters_by_name_case_insensitively() {
    //arrange
    let app = spawn_app().await;
    for (name, email) in [
        ("John Doe", "john@example.com"),
        ("Jane Doe", "jane@example.com"),
        ("Bob Smith", "bob@example.com"),
    ] {
        app.post_json("/customers", &json!({"name": name, "email": email}))
            .await;
    }

    //act
    let body: Value = app.get("/customers?name=doe").await.json().await.unwrap();

    //assert
    let customers = body.as_array().unwrap();
    assert_eq!(customers.len(), 2);
    for customer in customers {
        assert!(customer["name"]
            .as_str()
            .unwrap()
            .to_lowercase()
            .contains("doe"));
    }
    drop_database(&app.database_name);
}
