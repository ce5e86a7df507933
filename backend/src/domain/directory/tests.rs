//! Tests for the user-directory service.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::{fixture, rstest};
use uuid::Uuid;

use super::*;
use crate::domain::credentials::PlaintextPassword;
use crate::domain::ports::{FixtureReferralRepository, FixtureUserRepository};
use crate::domain::user::UserProfile;
use crate::domain::{ErrorCode, Role};

type FixtureDirectory = UserDirectoryService<FixtureUserRepository, FixtureReferralRepository>;

#[fixture]
fn directory() -> FixtureDirectory {
    UserDirectoryService::new(
        Arc::new(FixtureUserRepository::new()),
        Arc::new(FixtureReferralRepository::new()),
        Arc::new(DefaultClock),
    )
}

fn new_user_request(email: &str, password: Option<&str>) -> NewUserRequest {
    NewUserRequest {
        email: email.to_owned(),
        password: password
            .map(|raw| PlaintextPassword::new(raw).expect("valid test password")),
        profile: UserProfile {
            title: "Engineer".to_owned(),
            first_name: "Jane".to_owned(),
            last_name: "Doe".to_owned(),
            age: Some(34),
            dob: "1991-05-02".to_owned(),
        },
    }
}

fn referral_submission() -> ReferralSubmission {
    ReferralSubmission {
        email: "candidate@example.com".to_owned(),
        first_name: "Sam".to_owned(),
        last_name: "Field".to_owned(),
        age: 29,
        dob: "1996-11-23".to_owned(),
    }
}

#[rstest]
#[tokio::test]
async fn create_user_applies_the_regular_flag_set(directory: FixtureDirectory) {
    let user = directory
        .create_user(new_user_request("jane@example.com", Some("a sturdy passphrase")))
        .await
        .expect("creation succeeds");

    assert!(!user.is_staff());
    assert!(!user.is_superuser());
    assert!(user.is_active());
    assert_eq!(user.role(), Role::Head);
    assert!(!user.id().is_nil());
    assert_eq!(user.record().created_at(), user.record().updated_at());
}

#[rstest]
#[tokio::test]
async fn create_user_stores_a_hash_not_the_plaintext(directory: FixtureDirectory) {
    let plaintext = PlaintextPassword::new("a sturdy passphrase").expect("valid test password");
    let user = directory
        .create_user(new_user_request("jane@example.com", Some("a sturdy passphrase")))
        .await
        .expect("creation succeeds");

    let hash = user.password().expect("password should be set");
    assert_ne!(hash.as_str(), plaintext.as_str());
    assert!(hash.verify(&plaintext));
}

#[rstest]
#[tokio::test]
async fn create_user_without_password_leaves_it_unusable(directory: FixtureDirectory) {
    let user = directory
        .create_user(new_user_request("jane@example.com", None))
        .await
        .expect("creation succeeds");
    assert!(!user.has_usable_password());
}

#[rstest]
#[tokio::test]
async fn create_superuser_applies_the_administrator_flag_set(directory: FixtureDirectory) {
    let user = directory
        .create_superuser(new_user_request("root@example.com", Some("a sturdy passphrase")))
        .await
        .expect("creation succeeds");

    assert!(user.is_staff());
    assert!(user.is_superuser());
    assert!(user.is_active());
}

#[rstest]
#[tokio::test]
async fn create_user_normalizes_the_email(directory: FixtureDirectory) {
    let user = directory
        .create_user(new_user_request("  Jane@EXAMPLE.COM ", None))
        .await
        .expect("creation succeeds");
    assert_eq!(user.email().as_ref(), "Jane@example.com");
}

#[rstest]
#[tokio::test]
async fn duplicate_normalized_emails_conflict(directory: FixtureDirectory) {
    directory
        .create_user(new_user_request("jane@example.com", None))
        .await
        .expect("first creation succeeds");

    let err = directory
        .create_user(new_user_request("jane@EXAMPLE.com", None))
        .await
        .expect_err("second creation must fail");
    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[rstest]
#[case("")]
#[case("not-an-email")]
#[case("user name@example.com")]
#[tokio::test]
async fn malformed_emails_are_rejected(directory: FixtureDirectory, #[case] email: &str) {
    let err = directory
        .create_user(new_user_request(email, None))
        .await
        .expect_err("malformed email must fail");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn save_user_advances_updated_at_strictly(directory: FixtureDirectory) {
    let mut user = directory
        .create_user(new_user_request("jane@example.com", None))
        .await
        .expect("creation succeeds");
    let created_at = user.record().created_at();
    let before_save = user.record().updated_at();

    user.profile_mut().title = "Staff Engineer".to_owned();
    directory.save_user(&mut user).await.expect("save succeeds");

    assert_eq!(user.record().created_at(), created_at);
    assert!(user.record().updated_at() > before_save);
}

#[rstest]
#[tokio::test]
async fn save_user_persists_the_mutated_fields() {
    let users = Arc::new(FixtureUserRepository::new());
    let directory = UserDirectoryService::new(
        users.clone(),
        Arc::new(FixtureReferralRepository::new()),
        Arc::new(DefaultClock),
    );

    let mut user = directory
        .create_user(new_user_request("jane@example.com", None))
        .await
        .expect("creation succeeds");
    user.set_role(Role::Employee);
    user.deactivate();
    directory.save_user(&mut user).await.expect("save succeeds");

    let stored = users
        .find_by_id(user.id())
        .await
        .expect("query succeeds")
        .expect("user exists");
    assert!(stored.is_employee());
    assert!(!stored.is_active());
    assert_eq!(stored.record().updated_at(), user.record().updated_at());
}

#[rstest]
#[tokio::test]
async fn submit_referral_records_the_candidate(directory: FixtureDirectory) {
    let referral = directory
        .submit_referral(referral_submission())
        .await
        .expect("submission succeeds");

    assert_eq!(referral.email().as_ref(), "candidate@example.com");
    assert_eq!(referral.first_name(), "Sam");
    assert!(!referral.id().is_nil());
    assert_eq!(referral.record().created_at(), referral.record().updated_at());
}

#[rstest]
#[tokio::test]
async fn referral_submissions_with_missing_fields_are_rejected(directory: FixtureDirectory) {
    let mut submission = referral_submission();
    submission.first_name = String::new();

    let err = directory
        .submit_referral(submission)
        .await
        .expect_err("incomplete submission must fail");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

/// Stub repository that fails every operation with a fixed error.
struct FailingUserRepository(UserStoreError);

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn insert(&self, _user: &User) -> Result<(), UserStoreError> {
        Err(self.0.clone())
    }

    async fn update(&self, _user: &User) -> Result<(), UserStoreError> {
        Err(self.0.clone())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>, UserStoreError> {
        Err(self.0.clone())
    }

    async fn find_by_email(
        &self,
        _email: &EmailAddress,
    ) -> Result<Option<User>, UserStoreError> {
        Err(self.0.clone())
    }
}

#[rstest]
#[case(UserStoreError::connection("database unavailable"), ErrorCode::ServiceUnavailable)]
#[case(UserStoreError::query("database query failed"), ErrorCode::InternalError)]
#[tokio::test]
async fn store_failures_surface_as_domain_errors(
    #[case] failure: UserStoreError,
    #[case] expected: ErrorCode,
) {
    let directory = UserDirectoryService::new(
        Arc::new(FailingUserRepository(failure)),
        Arc::new(FixtureReferralRepository::new()),
        Arc::new(DefaultClock),
    );

    let err = directory
        .create_user(new_user_request("jane@example.com", None))
        .await
        .expect_err("store failure must surface");
    assert_eq!(err.code(), expected);
}
