//! Report API handler.
//!
//! ```text
//! GET /api/v1/report
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, ReviewReport};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Response body for `GET /api/v1/report`.
///
/// `averageRating` and `mostReviewedRestaurantName` are `null` when the
/// principal has authored no reviews; the count is then `0`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    #[schema(example = 4.5)]
    pub average_rating: Option<f64>,
    #[schema(example = "Cafe Nero")]
    pub most_reviewed_restaurant_name: Option<String>,
    #[schema(example = 3)]
    pub most_reviewed_count: i64,
}

impl From<ReviewReport> for ReportResponse {
    fn from(value: ReviewReport) -> Self {
        let (name, count) = value
            .most_reviewed
            .map(|most| (Some(most.name), most.count))
            .unwrap_or((None, 0));
        Self {
            average_rating: value.average_rating,
            most_reviewed_restaurant_name: name,
            most_reviewed_count: count,
        }
    }
}

/// Aggregate the session principal's reviews.
#[utoipa::path(
    get,
    path = "/api/v1/report",
    responses(
        (status = 200, description = "Review report", body = ReportResponse),
        (status = 401, description = "Unauthorised", body = Error)
    ),
    tags = ["report"],
    operation_id = "report"
)]
#[get("/report")]
pub async fn report(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ReportResponse>> {
    let principal = session.require_user_id()?;
    let report = state.reports.report(principal).await?;
    Ok(web::Json(report.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockReportQuery;
    use crate::domain::{RestaurantId, RestaurantReviewCount, UserId};
    use crate::inbound::http::test_utils::{session_cookie, test_state};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse as TestHttpResponse, test, web};
    use serde_json::Value;

    fn app_with(
        reports: MockReportQuery,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let mut state = test_state();
        state.reports = std::sync::Arc::new(reports);
        App::new()
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .app_data(web::Data::new(state))
            .service(web::scope("/api/v1").service(report))
            .route(
                "/test/login",
                web::get().to(|session: SessionContext| async move {
                    session.persist_user(UserId::new(5))?;
                    Ok::<_, Error>(TestHttpResponse::Ok())
                }),
            )
    }

    #[actix_web::test]
    async fn rejects_without_session() {
        let app = test::init_service(app_with(MockReportQuery::new())).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/report").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn returns_aggregates_for_the_principal() {
        let mut reports = MockReportQuery::new();
        reports
            .expect_report()
            .withf(|principal| *principal == UserId::new(5))
            .times(1)
            .return_once(|_| {
                Ok(ReviewReport {
                    average_rating: Some(4.5),
                    most_reviewed: Some(RestaurantReviewCount {
                        restaurant_id: RestaurantId::new(2),
                        name: "Cafe".into(),
                        count: 3,
                    }),
                })
            });
        let app = test::init_service(app_with(reports)).await;

        let login_res =
            test::call_service(&app, test::TestRequest::get().uri("/test/login").to_request())
                .await;
        let cookie = session_cookie(&login_res).into_owned();

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/report")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body.get("averageRating").and_then(Value::as_f64), Some(4.5));
        assert_eq!(
            body.get("mostReviewedRestaurantName").and_then(Value::as_str),
            Some("Cafe")
        );
        assert_eq!(body.get("mostReviewedCount").and_then(Value::as_i64), Some(3));
    }

    #[actix_web::test]
    async fn empty_history_yields_nulls_and_zero() {
        let mut reports = MockReportQuery::new();
        reports.expect_report().times(1).return_once(|_| {
            Ok(ReviewReport {
                average_rating: None,
                most_reviewed: None,
            })
        });
        let app = test::init_service(app_with(reports)).await;

        let login_res =
            test::call_service(&app, test::TestRequest::get().uri("/test/login").to_request())
                .await;
        let cookie = session_cookie(&login_res).into_owned();

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/report")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(res).await;
        assert!(body.get("averageRating").expect("field").is_null());
        assert!(
            body.get("mostReviewedRestaurantName")
                .expect("field")
                .is_null()
        );
        assert_eq!(body.get("mostReviewedCount").and_then(Value::as_i64), Some(0));
    }
}
