use crate::api;
use crate::traits::RequestBody;
use crate::AppState;

pub(crate) fn router() -> axum::Router<AppState> {
    use axum::routing::{get, post};

    axum::Router::new()
        // Record lifecycle
        .route(
            "/submit-record",
            post(api::submit_record::SubmitRecordRequest::as_multipart_form_handler),
        )
        .route(
            "/review-record",
            post(api::review_record::ReviewRecordRequest::as_multipart_form_handler),
        )
        .route(
            "/pending-records",
            get(api::records::PendingRecordsRequest::as_handler_query),
        )
        .route(
            "/user-records",
            get(api::records::UserRecordsRequest::as_handler_query),
        )
        .route(
            "/boss-records",
            get(api::records::BossRecordsRequest::as_handler_query),
        )
        .route(
            "/recent-records",
            get(api::records::RecentRecordsRequest::as_handler_query),
        )
        // Boss directory
        .route(
            "/create-boss",
            post(api::bosses::CreateBossRequest::as_multipart_form_handler),
        )
        .route("/bosses", get(api::bosses::BossesRequest::as_handler_query))
        .route("/boss", get(api::bosses::BossRequest::as_handler_query))
        .route(
            "/team-sizes",
            get(api::bosses::TeamSizesRequest::as_handler_query),
        )
        // Statistics
        .route(
            "/stats/top-record-holders",
            get(api::stats::TopRecordHoldersRequest::as_handler_query),
        )
        .route(
            "/stats/most-active-members",
            get(api::stats::MostActiveMembersRequest::as_handler_query),
        )
        .route(
            "/stats/submissions",
            get(api::stats::SubmissionStatsRequest::as_handler_query),
        )
        .route(
            "/stats/top-boss-completions",
            get(api::stats::TopBossCompletionsRequest::as_handler_query),
        )
        .route(
            "/stats/user",
            get(api::stats::UserStatsRequest::as_handler_query),
        )
        // Sessions
        .route(
            "/sign-out",
            post(api::sign_out::SignOutRequest::as_handler_query),
        )
        // User administration
        .route(
            "/set-verification-status",
            post(api::edit_user::SetVerificationStatusRequest::as_json_handler),
        )
        .route(
            "/set-role",
            post(api::edit_user::SetRoleRequest::as_json_handler),
        )
        .route(
            "/users-with-rsn",
            get(api::edit_user::UsersWithRsnRequest::as_handler_query),
        )
        .route(
            "/users",
            get(api::edit_user::UsersRequest::as_handler_query),
        )
}
