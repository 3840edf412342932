//! Contract tests for the payment method and transaction endpoints
//!
//! Runs the real route table against an in-memory store and checks status
//! codes, camelCase field names and the error body shape.

use std::sync::Mutex;

use actix_web::{test, web, App};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use spendwise::core::Currency;
use spendwise::reports::ReportService;
use spendwise::{routes, MemoryStorage, StoreSettings, TransactionStore};

macro_rules! app {
    () => {{
        let store = TransactionStore::open(MemoryStorage::new(), StoreSettings::default()).unwrap();
        test::init_service(
            App::new()
                .app_data(web::Data::new(Mutex::new(store)))
                .app_data(web::Data::new(ReportService::new(Currency::BRL, dec!(2000))))
                .configure(routes::configure),
        )
        .await
    }};
}

fn notebook() -> Value {
    json!({
        "description": "Notebook",
        "amount": 100.00,
        "date": "2024-01-15",
        "category": "shopping",
        "paymentMethod": "credit",
        "totalInstallments": 3
    })
}

#[actix_web::test]
async fn test_list_default_payment_methods() {
    let app = app!();

    let req = test::TestRequest::get().uri("/v1/payment-methods").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let methods = body.as_array().unwrap();
    assert_eq!(methods.len(), 3);
    assert_eq!(methods[2]["id"], "credit");
    assert_eq!(methods[2]["type"], "credit");
    assert_eq!(methods[2]["color"], "#ef4444");
}

#[actix_web::test]
async fn test_create_installment_transaction() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/v1/transactions")
        .set_json(notebook())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["id"].as_str().unwrap().starts_with("tr-"));
    assert_eq!(body["description"], "Notebook");
    assert_eq!(body["totalInstallments"], 3);
    assert_eq!(body["installmentAmount"], "33.34");
    assert_eq!(body["dueMonth"], "2024-02");
    assert_eq!(body["installments"][2]["dueDate"], "2024-04-11");
}

#[actix_web::test]
async fn test_fractional_installment_count_is_400() {
    let app = app!();
    let mut payload = notebook();
    payload["totalInstallments"] = json!(2.5);

    let req = test::TestRequest::post()
        .uri("/v1/transactions")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 400);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("installment count"));
}

#[actix_web::test]
async fn test_whole_valued_float_installment_count_is_accepted() {
    let app = app!();
    let mut payload = notebook();
    payload["totalInstallments"] = json!(2.0);

    let req = test::TestRequest::post()
        .uri("/v1/transactions")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["totalInstallments"], 2);
    assert_eq!(body["installments"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_oversized_amount_is_400_and_reports_still_render() {
    let app = app!();
    let mut payload = notebook();
    payload["amount"] = json!("50000000000000000000000000000");

    let req = test::TestRequest::post()
        .uri("/v1/transactions")
        .set_json(payload)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    let req = test::TestRequest::post()
        .uri("/v1/transactions")
        .set_json(notebook())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::get()
        .uri("/v1/reports/monthly/2024-02")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
}

#[actix_web::test]
async fn test_malformed_body_is_400() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/v1/transactions")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"description\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_update_and_delete_unknown_transaction_is_404() {
    let app = app!();

    let req = test::TestRequest::put()
        .uri("/v1/transactions/tr-missing")
        .set_json(notebook())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = test::TestRequest::delete()
        .uri("/v1/transactions/tr-missing")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn test_update_then_delete_transaction() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/v1/transactions")
        .set_json(notebook())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap().to_string();

    let mut changed = notebook();
    changed["paymentMethod"] = json!("cash");
    let req = test::TestRequest::put()
        .uri(&format!("/v1/transactions/{}", id))
        .set_json(changed)
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["id"], id.as_str());
    assert!(updated.get("installments").is_none());

    let req = test::TestRequest::delete()
        .uri(&format!("/v1/transactions/{}", id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 204);

    let req = test::TestRequest::get().uri("/v1/transactions").to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_list_transactions_search_and_sort() {
    let app = app!();
    for (description, amount, date) in [
        ("Market", 80, "2024-01-05"),
        ("Cinema", 40, "2024-01-09"),
        ("Supermarket", 120, "2024-01-07"),
    ] {
        let req = test::TestRequest::post()
            .uri("/v1/transactions")
            .set_json(json!({
                "description": description,
                "amount": amount,
                "date": date,
                "category": "food"
            }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 201);
    }

    let req = test::TestRequest::get()
        .uri("/v1/transactions?search=market&sort=amount&direction=desc")
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["description"].as_str().unwrap())
        .collect();

    assert_eq!(names, vec!["Supermarket", "Market"]);
}

#[actix_web::test]
async fn test_invalid_sort_key_is_400() {
    let app = app!();

    let req = test::TestRequest::get()
        .uri("/v1/transactions?sort=color")
        .to_request();

    assert_eq!(test::call_service(&app, req).await.status(), 400);
}

#[actix_web::test]
async fn test_delete_payment_method_in_use_is_409() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/v1/transactions")
        .set_json(notebook())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::delete()
        .uri("/v1/payment-methods/credit")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 409);

    let req = test::TestRequest::get().uri("/v1/payment-methods").to_request();
    let methods: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(methods.as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn test_create_and_delete_payment_method() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/v1/payment-methods")
        .set_json(json!({
            "name": "Travel card",
            "type": "credit",
            "billingCycle": {"closingDay": 20, "dueDay": 28}
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["billingCycle"]["dueDay"], 28);

    let req = test::TestRequest::delete()
        .uri(&format!("/v1/payment-methods/{}", created["id"].as_str().unwrap()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 204);
}

#[actix_web::test]
async fn test_billing_cycle_on_cash_method_is_400() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/v1/payment-methods")
        .set_json(json!({
            "name": "Wallet",
            "type": "cash",
            "billingCycle": {"closingDay": 4, "dueDay": 11}
        }))
        .to_request();

    assert_eq!(test::call_service(&app, req).await.status(), 400);
}

#[actix_web::test]
async fn test_health() {
    let app = app!();

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}
