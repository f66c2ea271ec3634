//! Free-text date entry normalised to `YYYY-MM-DD`.
//!
//! The field accepts whatever the user types, keeps only digits and formats
//! them progressively. Upstream listeners only ever see either `""` ("not yet
//! valid") or a complete, real date that respects the configured minimum.

use chrono::NaiveDate;

use crate::utils::date::parse_storage_date;

const MAX_DIGITS: usize = 8;

/// Handle returned by the `subscribe_*` methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type ChangeCallback = Box<dyn FnMut(&str)>;
type TouchedCallback = Box<dyn FnMut()>;

#[derive(Default)]
pub struct DateFieldValidator {
    value: String,
    min: Option<NaiveDate>,
    disabled: bool,
    next_subscription: u64,
    change_listeners: Vec<(SubscriptionId, ChangeCallback)>,
    touched_listeners: Vec<(SubscriptionId, TouchedCallback)>,
}

impl std::fmt::Debug for DateFieldValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateFieldValidator")
            .field("value", &self.value)
            .field("min", &self.min)
            .field("disabled", &self.disabled)
            .field("change_listeners", &self.change_listeners.len())
            .field("touched_listeners", &self.touched_listeners.len())
            .finish()
    }
}

impl DateFieldValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min(min: Option<NaiveDate>) -> Self {
        Self {
            min,
            ..Self::default()
        }
    }

    pub fn min(&self) -> Option<NaiveDate> {
        self.min
    }

    pub fn set_min(&mut self, min: Option<NaiveDate>) {
        self.min = min;
    }

    /// Text currently shown in the field.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Replaces the field contents without notifying listeners.
    pub fn write_value(&mut self, value: Option<&str>) {
        self.value = value.unwrap_or_default().to_string();
    }

    pub fn subscribe_change(&mut self, callback: impl FnMut(&str) + 'static) -> SubscriptionId {
        let id = self.next_id();
        self.change_listeners.push((id, Box::new(callback)));
        id
    }

    pub fn subscribe_touched(&mut self, callback: impl FnMut() + 'static) -> SubscriptionId {
        let id = self.next_id();
        self.touched_listeners.push((id, Box::new(callback)));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.change_listeners.len() + self.touched_listeners.len();
        self.change_listeners.retain(|(listener, _)| *listener != id);
        self.touched_listeners.retain(|(listener, _)| *listener != id);
        before != self.change_listeners.len() + self.touched_listeners.len()
    }

    /// Processes raw keyboard input and returns the formatted field text.
    pub fn handle_input(&mut self, raw: &str) -> String {
        let digits: String = raw
            .chars()
            .filter(char::is_ascii_digit)
            .take(MAX_DIGITS)
            .collect();

        if digits.is_empty() {
            self.value.clear();
            self.emit_change("");
            return String::new();
        }

        let formatted = format_digits(&digits);
        self.value = formatted.clone();

        if digits.len() < MAX_DIGITS {
            self.emit_change("");
        } else if is_valid_date(&formatted, self.min) {
            self.emit_change(&formatted);
        } else {
            // A complete but impossible date keeps the upstream value untouched.
            log::debug!("Rejected date input {formatted}");
        }

        formatted
    }

    /// Marks the field as touched and clears it if it is not a valid date.
    pub fn handle_blur(&mut self) {
        for (_, callback) in self.touched_listeners.iter_mut() {
            callback();
        }

        if !is_valid_date(&self.value, self.min) {
            self.value.clear();
            self.emit_change("");
        }
    }

    fn emit_change(&mut self, value: &str) {
        for (_, callback) in self.change_listeners.iter_mut() {
            callback(value);
        }
    }

    fn next_id(&mut self) -> SubscriptionId {
        self.next_subscription += 1;
        SubscriptionId(self.next_subscription)
    }
}

/// Formats up to eight digits as `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
pub fn format_digits(digits: &str) -> String {
    let mut formatted = String::with_capacity(10);
    for (index, digit) in digits.chars().take(MAX_DIGITS).enumerate() {
        if index == 4 || index == 6 {
            formatted.push('-');
        }
        formatted.push(digit);
    }
    formatted
}

/// `YYYY-MM-DD`, a real calendar date, and not before `min` when given.
pub fn is_valid_date(value: &str, min: Option<NaiveDate>) -> bool {
    match parse_storage_date(value) {
        Some(date) => min.map_or(true, |min| date >= min),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use test_case::test_case;

    fn recording(validator: &mut DateFieldValidator) -> Rc<RefCell<Vec<String>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        validator.subscribe_change(move |value| sink.borrow_mut().push(value.to_string()));
        seen
    }

    #[test_case("2" => "2"; "single digit")]
    #[test_case("2030" => "2030"; "year only")]
    #[test_case("20301" => "2030-1"; "partial month")]
    #[test_case("203012" => "2030-12"; "year and month")]
    #[test_case("2030122" => "2030-12-2"; "partial day")]
    #[test_case("20301225" => "2030-12-25"; "complete")]
    #[test_case("2030-12-25" => "2030-12-25"; "dashes are stripped")]
    #[test_case("2030/12/25 extra 99" => "2030-12-25"; "extra digits are dropped")]
    #[test_case("abc" => ""; "no digits")]
    fn test_handle_input_formats(raw: &str) -> String {
        DateFieldValidator::new().handle_input(raw)
    }

    #[test_case("2030-12-25", None => true; "real date")]
    #[test_case("2032-02-29", None => true; "leap day")]
    #[test_case("2031-02-29", None => false; "not a leap year")]
    #[test_case("2030-04-31", None => false; "thirty day month")]
    #[test_case("2030-1-05", None => false; "short month")]
    #[test_case("2030-06-01", NaiveDate::from_ymd_opt(2030, 6, 1) => true; "equal to min")]
    #[test_case("2030-05-31", NaiveDate::from_ymd_opt(2030, 6, 1) => false; "before min")]
    fn test_is_valid_date(value: &str, min: Option<NaiveDate>) -> bool {
        is_valid_date(value, min)
    }

    #[test]
    fn test_partial_input_emits_empty() {
        let mut validator = DateFieldValidator::new();
        let seen = recording(&mut validator);

        validator.handle_input("2030");
        validator.handle_input("203012");

        assert_eq!(*seen.borrow(), vec!["", ""]);
    }

    #[test]
    fn test_complete_valid_input_emits_value() {
        let mut validator = DateFieldValidator::new();
        let seen = recording(&mut validator);

        validator.handle_input("20301225");

        assert_eq!(*seen.borrow(), vec!["2030-12-25"]);
        assert_eq!(validator.value(), "2030-12-25");
    }

    #[test]
    fn test_complete_impossible_date_emits_nothing() {
        let mut validator = DateFieldValidator::new();
        let seen = recording(&mut validator);

        validator.handle_input("20300431");

        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_date_before_minimum_is_not_emitted() {
        let mut validator = DateFieldValidator::with_min(NaiveDate::from_ymd_opt(2030, 1, 1));
        let seen = recording(&mut validator);

        validator.handle_input("20291231");
        validator.handle_input("20300101");

        assert_eq!(*seen.borrow(), vec!["2030-01-01"]);
    }

    #[test]
    fn test_blur_clears_invalid_value_and_notifies() {
        let mut validator = DateFieldValidator::new();
        let seen = recording(&mut validator);
        let touched = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&touched);
        validator.subscribe_touched(move || *counter.borrow_mut() += 1);

        validator.handle_input("203012");
        validator.handle_blur();

        assert_eq!(*touched.borrow(), 1);
        assert_eq!(validator.value(), "");
        assert_eq!(*seen.borrow(), vec!["", ""]);
    }

    #[test]
    fn test_blur_keeps_valid_value() {
        let mut validator = DateFieldValidator::new();
        validator.handle_input("20301225");
        let seen = recording(&mut validator);

        validator.handle_blur();

        assert_eq!(validator.value(), "2030-12-25");
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut validator = DateFieldValidator::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = validator.subscribe_change(move |value: &str| sink.borrow_mut().push(value.to_string()));

        assert!(validator.unsubscribe(id));
        assert!(!validator.unsubscribe(id));
        validator.handle_input("20301225");

        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_write_value_does_not_notify() {
        let mut validator = DateFieldValidator::new();
        let seen = recording(&mut validator);

        validator.write_value(Some("2030-12-25"));
        validator.write_value(None);

        assert_eq!(validator.value(), "");
        assert!(seen.borrow().is_empty());
    }
}
