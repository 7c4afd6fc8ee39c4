pub mod accessor;
pub mod error;
pub mod interstitials;
pub mod webdriver;

#[cfg(test)]
pub(crate) mod fake;
