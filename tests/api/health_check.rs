use crate::helper::spawn_app;
use ordering_system::db::drop_database;

#[tokio::test]
async fn health_check_works() {
    //arrange
    let app = spawn_app().await;

    //act
    let response = app.get("/health_check").await;

    drop_database(&app.database_name);

    //assert
    assert!(response.status().is_success());
}
