//! Integration tests for the referral intake workflow.

use std::sync::Arc;

use backend::domain::ports::{
    FixtureReferralRepository, FixtureUserRepository, ReferralRepository, ReferralSubmission,
    UserDirectory,
};
use backend::domain::{ErrorCode, UserDirectoryService};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type FixtureDirectory = UserDirectoryService<FixtureUserRepository, FixtureReferralRepository>;

struct Harness {
    directory: FixtureDirectory,
    referrals: Arc<FixtureReferralRepository>,
}

#[fixture]
fn harness() -> Harness {
    let referrals = Arc::new(FixtureReferralRepository::new());
    let directory = UserDirectoryService::new(
        Arc::new(FixtureUserRepository::new()),
        referrals.clone(),
        Arc::new(DefaultClock),
    );
    Harness {
        directory,
        referrals,
    }
}

fn submission() -> ReferralSubmission {
    ReferralSubmission {
        email: "Candidate@Example.COM".to_owned(),
        first_name: "Sam".to_owned(),
        last_name: "Field".to_owned(),
        age: 29,
        dob: "1996-11-23".to_owned(),
    }
}

#[rstest]
#[tokio::test]
async fn submissions_are_persisted_with_metadata(harness: Harness) {
    let referral = harness
        .directory
        .submit_referral(submission())
        .await
        .expect("submission succeeds");

    assert!(!referral.id().is_nil());
    assert_eq!(referral.record().created_at(), referral.record().updated_at());
    assert_eq!(referral.email().as_ref(), "Candidate@example.com");

    let stored = harness
        .referrals
        .find_by_id(referral.id())
        .await
        .expect("query succeeds")
        .expect("referral exists");
    assert_eq!(stored, referral);
}

#[rstest]
#[case::empty_email("", "Sam", "Field", 29, "1996-11-23")]
#[case::malformed_email("not-an-email", "Sam", "Field", 29, "1996-11-23")]
#[case::missing_first_name("candidate@example.com", "", "Field", 29, "1996-11-23")]
#[case::missing_last_name("candidate@example.com", "Sam", " ", 29, "1996-11-23")]
#[case::missing_dob("candidate@example.com", "Sam", "Field", 29, "")]
#[case::negative_age("candidate@example.com", "Sam", "Field", -4, "1996-11-23")]
#[tokio::test]
async fn incomplete_submissions_are_rejected(
    harness: Harness,
    #[case] email: &str,
    #[case] first_name: &str,
    #[case] last_name: &str,
    #[case] age: i32,
    #[case] dob: &str,
) {
    let incomplete = ReferralSubmission {
        email: email.to_owned(),
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        age,
        dob: dob.to_owned(),
    };

    let err = harness
        .directory
        .submit_referral(incomplete)
        .await
        .expect_err("incomplete submission must fail");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert!(harness.referrals.is_empty());
}

#[rstest]
#[tokio::test]
async fn referrals_do_not_reserve_directory_emails(harness: Harness) {
    harness
        .directory
        .submit_referral(submission())
        .await
        .expect("submission succeeds");

    // A referral is free-standing: the same address can still sign up.
    let user = harness
        .directory
        .create_user(backend::domain::ports::NewUserRequest {
            email: "candidate@example.com".to_owned(),
            password: None,
            profile: backend::domain::UserProfile::default(),
        })
        .await
        .expect("signup succeeds");
    assert_eq!(user.email().as_ref(), "candidate@example.com");
}
