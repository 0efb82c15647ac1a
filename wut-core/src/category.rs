//! Usage categories and the store that owns them.

use crate::config::ChartConfig;
use crate::error::{Result, TrackerError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A display color token such as `#6fb3ff` or `rgba(...)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Color(value.to_string())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One slice of the household water usage breakdown.
///
/// The color is fixed when the category is created; edits only touch the
/// label and value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageCategory {
    label: String,
    value: f64,
    color: Color,
}

impl UsageCategory {
    pub fn new(label: &str, value: f64, color: &str) -> Self {
        Self {
            label: label.to_string(),
            value,
            color: Color::from(color),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Relative usage weight (litres/day-equivalent)
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn color(&self) -> &Color {
        &self.color
    }
}

/// Integer percentage of `value` in `total`, rounded half-up.
///
/// A zero total yields 0 instead of a division fault.
pub fn percentage_of(value: f64, total: f64) -> u32 {
    if total <= 0.0 {
        return 0;
    }
    (value / total * 100.0).round() as u32
}

fn check_entry(label: &str, value: f64) -> Result<()> {
    if label.trim().is_empty() {
        return Err(ValidationError::EmptyLabel.into());
    }
    if !value.is_finite() {
        return Err(ValidationError::NotANumber.into());
    }
    if value <= 0.0 {
        return Err(ValidationError::NotPositive.into());
    }
    Ok(())
}

/// Ordered, exclusively owned collection of usage categories.
///
/// Order is pie-wedge order and legend order. Mutations do not trigger a
/// redraw; callers are responsible for re-rendering afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStore {
    categories: Vec<UsageCategory>,
    palette: Vec<Color>,
    fallback_color: Color,
    /// Number of palette colors handed out so far. Never decremented.
    colors_issued: usize,
}

impl CategoryStore {
    pub fn new(seed: Vec<UsageCategory>, palette: Vec<Color>, fallback_color: Color) -> Self {
        Self {
            categories: seed,
            palette,
            fallback_color,
            colors_issued: 0,
        }
    }

    pub fn from_config(config: &ChartConfig) -> Self {
        Self::new(
            config.seed.clone(),
            config.palette.clone(),
            config.fallback_color.clone(),
        )
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> &[UsageCategory] {
        &self.categories
    }

    pub fn get(&self, index: usize) -> Result<&UsageCategory> {
        self.categories.get(index).ok_or(TrackerError::OutOfRange {
            index,
            len: self.categories.len(),
        })
    }

    /// Sum of all category values; 0 for an empty store.
    pub fn total(&self) -> f64 {
        self.categories.iter().map(|c| c.value).sum()
    }

    /// Rounded share of the category at `index`, in whole percent.
    pub fn percentage(&self, index: usize) -> Result<u32> {
        let category = self.get(index)?;
        Ok(percentage_of(category.value, self.total()))
    }

    /// Total once the category at `replacing` (if any) holds `value`.
    fn check_total(&self, replacing: Option<usize>, value: f64) -> Result<()> {
        let others: f64 = self
            .categories
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != replacing)
            .map(|(_, c)| c.value)
            .sum();
        if !(others + value).is_finite() {
            return Err(ValidationError::TotalTooLarge.into());
        }
        Ok(())
    }

    /// Append a category, assigning the next palette color. Returns its index.
    pub fn add(&mut self, label: &str, value: f64) -> Result<usize> {
        check_entry(label, value)?;
        self.check_total(None, value)?;
        let color = if self.palette.is_empty() {
            self.fallback_color.clone()
        } else {
            self.palette[self.colors_issued % self.palette.len()].clone()
        };
        self.colors_issued += 1;
        self.categories.push(UsageCategory {
            label: label.to_string(),
            value,
            color,
        });
        log::debug!("Added category '{}' ({})", label, value);
        Ok(self.categories.len() - 1)
    }

    /// Replace label and value in place. Color is left untouched.
    pub fn update(&mut self, index: usize, label: &str, value: f64) -> Result<()> {
        let len = self.categories.len();
        if index >= len {
            return Err(TrackerError::OutOfRange { index, len });
        }
        check_entry(label, value)?;
        self.check_total(Some(index), value)?;
        let category = &mut self.categories[index];
        category.label = label.to_string();
        category.value = value;
        log::debug!("Updated category {} to '{}' ({})", index, label, value);
        Ok(())
    }

    /// Remove the category at `index`; later categories shift down.
    pub fn remove(&mut self, index: usize) -> Result<UsageCategory> {
        if index >= self.categories.len() {
            return Err(TrackerError::OutOfRange {
                index,
                len: self.categories.len(),
            });
        }
        let removed = self.categories.remove(index);
        log::debug!("Removed category {} '{}'", index, removed.label);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CategoryStore {
        CategoryStore::from_config(&ChartConfig::default())
    }

    #[test]
    fn test_total_and_percentages() {
        let store = store();
        assert_eq!(store.total(), 100.0);
        assert_eq!(store.percentage(0).unwrap(), 40);
        assert_eq!(store.percentage(3).unwrap(), 15);
    }

    #[test]
    fn test_delete_recomputes_percentages() {
        let mut store = store();
        let removed = store.remove(1).unwrap();
        assert_eq!(removed.label(), "Kitchen");
        let labels: Vec<&str> = store.categories().iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["Shower", "Laundry", "Outdoor / Other"]);
        assert_eq!(store.total(), 75.0);
        // 40 / 75 = 53.33%
        assert_eq!(store.percentage(0).unwrap(), 53);
    }

    #[test]
    fn test_empty_store_is_degenerate_not_fatal() {
        let store = CategoryStore::new(Vec::new(), vec![Color::from("#000")], Color::from("#ccc"));
        assert_eq!(store.total(), 0.0);
        assert_eq!(percentage_of(10.0, store.total()), 0);
        assert_eq!(
            store.percentage(0),
            Err(TrackerError::OutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(percentage_of(1.0, 8.0), 13); // 12.5
        assert_eq!(percentage_of(1.0, 3.0), 33);
        assert_eq!(percentage_of(2.0, 3.0), 67);
    }

    #[test]
    fn test_percentages_need_not_sum_to_100() {
        // Independent rounding: 33 + 33 + 33 = 99. Not reconciled.
        let mut store = CategoryStore::new(Vec::new(), vec![Color::from("#000")], Color::from("#ccc"));
        for label in ["A", "B", "C"] {
            store.add(label, 1.0).unwrap();
        }
        let sum: u32 = (0..store.len()).map(|i| store.percentage(i).unwrap()).sum();
        assert_eq!(sum, 99);
        assert!((sum as i64 - 100).abs() <= store.len() as i64 - 1);
    }

    #[test]
    fn test_add_cycles_palette() {
        let mut store = store();
        let palette = ChartConfig::default().palette;
        for i in 0..7 {
            let index = store.add(&format!("Extra {}", i), 5.0).unwrap();
            assert_eq!(store.get(index).unwrap().color(), &palette[i % palette.len()]);
        }
    }

    #[test]
    fn test_add_then_remove_restores_structure_but_not_color_counter() {
        let mut store = store();
        let before: Vec<UsageCategory> = store.categories().to_vec();

        let index = store.add("X", 10.0).unwrap();
        store.remove(index).unwrap();
        assert_eq!(store.categories(), before.as_slice());

        // Next color continues the cycle instead of reusing the first one
        let index = store.add("Y", 10.0).unwrap();
        assert_eq!(store.get(index).unwrap().color().as_str(), "#f78fb3");
    }

    #[test]
    fn test_update_keeps_color() {
        let mut store = store();
        let color = store.get(2).unwrap().color().clone();
        store.update(2, "Washing", 30.0).unwrap();
        let updated = store.get(2).unwrap();
        assert_eq!(updated.label(), "Washing");
        assert_eq!(updated.value(), 30.0);
        assert_eq!(updated.color(), &color);
    }

    #[test]
    fn test_out_of_range() {
        let mut store = store();
        assert_eq!(
            store.update(4, "Pool", 1.0),
            Err(TrackerError::OutOfRange { index: 4, len: 4 })
        );
        assert!(matches!(store.remove(9), Err(TrackerError::OutOfRange { .. })));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_store_rejects_non_positive_values() {
        let mut store = store();
        assert!(store.add("Pool", 0.0).is_err());
        assert!(store.add("Pool", f64::NAN).is_err());
        assert!(store.update(0, "Shower", -1.0).is_err());
        assert_eq!(store.total(), 100.0);
    }

    #[test]
    fn test_total_must_stay_finite() {
        let mut store = store();
        assert_eq!(store.add("A", 1e308), Ok(4));
        assert_eq!(
            store.add("B", 1e308),
            Err(TrackerError::Validation(ValidationError::TotalTooLarge))
        );
        assert_eq!(
            store.update(0, "Shower", f64::MAX),
            Err(TrackerError::Validation(ValidationError::TotalTooLarge))
        );
        assert_eq!(store.len(), 5);
        assert!(store.total().is_finite());

        // Replacing the huge value itself is measured without it
        store.update(4, "A", 1.5e308).unwrap();
        assert_eq!(store.percentage(4), Ok(100));
    }
}
