use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

use super::selectors::{LOGIN_BY_PHONE, LOGIN_SUBMIT, PASSWORD_INPUT, PHONE_INPUT};
use super::LOGIN_URL;
use crate::browser::BookingBrowser;
use crate::error::{ReservationError, Result};
use crate::models::Credentials;
use crate::parsers::has_element;

/// Logs in with phone number and password. `settle` is the pause granted to
/// the page after loading and after submitting.
pub async fn login(
    browser: &dyn BookingBrowser,
    credentials: &Credentials,
    settle: Duration,
) -> Result<()> {
    info!("Logging in as {}", credentials.username);
    browser.goto(LOGIN_URL).await?;
    sleep(settle).await;

    browser.click(LOGIN_BY_PHONE).await?;
    sleep(settle / 2).await;

    browser.type_text(PHONE_INPUT, &credentials.username).await?;
    browser
        .type_text(PASSWORD_INPUT, credentials.password.expose())
        .await?;
    browser.click(LOGIN_SUBMIT).await?;
    sleep(settle).await;

    // A successful login leaves the form page.
    let page = browser.content().await?;
    if has_element(&page, PASSWORD_INPUT) {
        return Err(ReservationError::Login(
            "still on the login form after submitting".to_string(),
        ));
    }

    debug!("Login form left, session established");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::scripted::ScriptedBrowser;
    use crate::models::Secret;
    use pretty_assertions::assert_eq;

    fn credentials() -> Credentials {
        Credentials {
            username: "01012345678".to_string(),
            password: Secret::new("pw"),
        }
    }

    #[tokio::test]
    async fn fills_phone_login_form() {
        let browser = ScriptedBrowser::new()
            .serve(LOGIN_URL, vec!["<html><body>메인</body></html>".to_string()]);

        login(&browser, &credentials(), Duration::ZERO).await.unwrap();

        assert_eq!(
            browser.actions(),
            vec![
                format!("goto {}", LOGIN_URL),
                format!("click {}", LOGIN_BY_PHONE),
                format!("type {} 01012345678", PHONE_INPUT),
                format!("type {} pw", PASSWORD_INPUT),
                format!("click {}", LOGIN_SUBMIT),
            ]
        );
    }

    #[tokio::test]
    async fn staying_on_login_form_is_a_failure() {
        let browser = ScriptedBrowser::new().serve(
            LOGIN_URL,
            vec![r#"<form id="login-form"><input id="hmpgPwdCphd03"></form>"#.to_string()],
        );

        let err = login(&browser, &credentials(), Duration::ZERO).await.unwrap_err();
        assert!(matches!(err, ReservationError::Login(_)));
    }

    #[tokio::test]
    async fn missing_element_aborts_login() {
        let browser = ScriptedBrowser::new().without(LOGIN_BY_PHONE);

        let err = login(&browser, &credentials(), Duration::ZERO).await.unwrap_err();
        assert!(matches!(err, ReservationError::ElementNotFound { .. }));
        assert_eq!(browser.count("type"), 0);
    }
}
