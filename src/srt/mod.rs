mod login;
mod search;

pub use login::login;
pub use search::attempt_reservation;
#[cfg(test)]
pub(crate) use search::fixtures;

pub const LOGIN_URL: &str = "https://etk.srail.kr/cmc/01/selectLoginForm.do";
pub const SCHEDULE_URL: &str = "https://etk.srail.kr/hpg/hra/01/selectScheduleList.do";

/// Button label of a train that still has seats.
pub const BOOKABLE_LABEL: &str = "예약하기";

pub mod selectors {
    /// "Phone number" tab of the login form.
    pub const LOGIN_BY_PHONE: &str = "#srchDvCd3";
    pub const PHONE_INPUT: &str = "#srchDvNm03";
    pub const PASSWORD_INPUT: &str = "#hmpgPwdCphd03";
    pub const LOGIN_SUBMIT: &str = "#login-form > fieldset > div:nth-of-type(1) > div:nth-of-type(1) > div:nth-of-type(4) > div > div:nth-of-type(2) > input";

    pub const DEPARTURE_INPUT: &str = "#dptRsStnCdNm";
    pub const ARRIVAL_INPUT: &str = "#arvRsStnCdNm";
    pub const HOUR_SELECT: &str = "#dptTm";
    pub const SEARCH_BUTTON: &str = "#search_top_tag > input";

    pub const FIRST_TRAIN_ROW: &str =
        "#result-form > fieldset > div:nth-of-type(6) > table > tbody > tr:nth-of-type(1)";
    pub const BOOK_BUTTON_IN_ROW: &str = "td:nth-of-type(6) > a";
    pub const FIRST_TRAIN_BOOK_BUTTON: &str = "#result-form > fieldset > div:nth-of-type(6) > table > tbody > tr:nth-of-type(1) > td:nth-of-type(6) > a";
    pub const DEPARTURE_TIME_IN_ROW: &str = "td.time";
}
