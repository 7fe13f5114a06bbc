use mealmate_shared::Error;
use mealmate_user::{LoginInput, SignupInput};
use temp_dir::TempDir;

mod helpers;

fn input(username: &str, password: &str, confirm: &str) -> SignupInput {
    SignupInput {
        username: username.to_owned(),
        email: format!("{username}@mealmate.localhost"),
        password: password.to_owned(),
        confirm_password: confirm.to_owned(),
    }
}

#[tokio::test]
async fn signup_rules() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    helpers::create_user(&state, "taken").await?;
    let cmd = state.command();

    let cases = [
        (input("", "my_password", "my_password"), "All fields are required."),
        (input("jane", "my_password", "other_password"), "Passwords do not match."),
        (input("jane", "short", "short"), "Password must be at least 8 characters long."),
        (input("taken", "my_password", "my_password"), "Username already exists."),
    ];

    for (input, message) in cases {
        let err = cmd.start_signup(input).await.unwrap_err();
        assert_eq!(err.to_string(), message);
    }

    let err = cmd
        .start_signup(SignupInput {
            username: "jane".to_owned(),
            email: "taken@mealmate.localhost".to_owned(),
            password: "my_password".to_owned(),
            confirm_password: "my_password".to_owned(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Email already registered.");

    let err = cmd
        .start_signup(SignupInput {
            username: "jane".to_owned(),
            email: "not-an-email".to_owned(),
            password: "my_password".to_owned(),
            confirm_password: "my_password".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    assert_eq!(helpers::otp_count(&state).await?, 0);

    Ok(())
}

#[tokio::test]
async fn complete_signup_creates_verified_user() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = state.command();

    let (pending, otp_id) = cmd
        .start_signup(input("jane", "my_password", "my_password"))
        .await?;

    assert_ne!(pending.password_hash, "my_password");
    assert!(state.query().find_by_username("jane").await?.is_none());
    assert_eq!(
        state.mailer.sent.lock().unwrap()[0].subject,
        "MealMate - Verify Your Email to Complete Signup"
    );

    let code = helpers::otp_code(&state, otp_id).await?;
    let user_id = cmd.complete_signup(&pending, otp_id, &code).await?;

    let user = state.query().find_by_id(user_id).await?.unwrap();
    assert_eq!(user.username, "jane");
    assert!(user.email_verified);

    let (otp_user_id, is_verified) = sqlx::query_as::<_, (Option<i64>, bool)>(
        "SELECT user_id, is_verified FROM email_otp WHERE id = ?",
    )
    .bind(otp_id)
    .fetch_one(&state.pool)
    .await?;
    assert_eq!(otp_user_id, Some(user_id));
    assert!(is_verified);

    let logged_in = cmd
        .login(LoginInput {
            login: "jane@mealmate.localhost".to_owned(),
            password: "my_password".to_owned(),
        })
        .await?;
    assert_eq!(logged_in, user_id);

    Ok(())
}

#[tokio::test]
async fn wrong_code_creates_nothing() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = state.command();

    let (pending, otp_id) = cmd
        .start_signup(input("jane", "my_password", "my_password"))
        .await?;
    let code = helpers::otp_code(&state, otp_id).await?;
    let wrong = if code == "123456" { "654321" } else { "123456" };

    let err = cmd.complete_signup(&pending, otp_id, wrong).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid OTP");
    assert!(state.query().find_by_username("jane").await?.is_none());

    cmd.complete_signup(&pending, otp_id, &code).await?;
    let err = cmd.complete_signup(&pending, otp_id, &code).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}

#[tokio::test]
async fn email_must_match_pending_signup() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = state.command();

    let (_, jane_otp) = cmd
        .start_signup(input("jane", "my_password", "my_password"))
        .await?;
    let (mark, _) = cmd
        .start_signup(input("mark", "my_password", "my_password"))
        .await?;

    let code = helpers::otp_code(&state, jane_otp).await?;
    let err = cmd.complete_signup(&mark, jane_otp, &code).await.unwrap_err();

    assert_eq!(err.to_string(), "Email mismatch. Please sign up again.");

    Ok(())
}

#[tokio::test]
async fn signup_resend_uses_new_code() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = state.command();

    let (pending, first) = cmd
        .start_signup(input("jane", "my_password", "my_password"))
        .await?;
    let second = cmd.resend_signup_otp(&pending, first).await?;

    assert_ne!(first, second);
    assert_eq!(
        state.mailer.sent.lock().unwrap()[1].subject,
        "MealMate - Verify Your Email (OTP Resent)"
    );

    let code = helpers::otp_code(&state, second).await?;
    cmd.complete_signup(&pending, second, &code).await?;

    Ok(())
}

#[tokio::test]
async fn signup_delivery_failure_leaves_no_otp() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    state.mailer.fail_with("smtp down");

    let err = state
        .command()
        .start_signup(input("jane", "my_password", "my_password"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Failed to send email: smtp down");
    assert_eq!(helpers::otp_count(&state).await?, 0);

    Ok(())
}
