//! View Visibility Configuration
//!
//! Which guest table columns and guest form fields are shown. The server
//! stores these as plain `string -> bool` maps; they are validated here
//! before reaching any component.

use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewConfigError {
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
    #[error("Unknown form field: {0}")]
    UnknownFormField(String),
}

/// Guest table columns, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GuestColumn {
    FullName,
    Phone,
    Email,
    Menu,
    Allergies,
    Tags,
    Validated,
    AccommodationPlan,
    NeedsHotel,
    NeedsTransport,
    NeedsTransportBack,
    Disability,
    Observations,
}

impl GuestColumn {
    pub const ALL: [GuestColumn; 13] = [
        GuestColumn::FullName,
        GuestColumn::Phone,
        GuestColumn::Email,
        GuestColumn::Menu,
        GuestColumn::Allergies,
        GuestColumn::Tags,
        GuestColumn::Validated,
        GuestColumn::AccommodationPlan,
        GuestColumn::NeedsHotel,
        GuestColumn::NeedsTransport,
        GuestColumn::NeedsTransportBack,
        GuestColumn::Disability,
        GuestColumn::Observations,
    ];

    pub fn key(self) -> &'static str {
        match self {
            GuestColumn::FullName => "full_name",
            GuestColumn::Phone => "phone",
            GuestColumn::Email => "email",
            GuestColumn::Menu => "menu",
            GuestColumn::Allergies => "allergies",
            GuestColumn::Tags => "tags",
            GuestColumn::Validated => "validated",
            GuestColumn::AccommodationPlan => "accommodation_plan",
            GuestColumn::NeedsHotel => "needs_hotel",
            GuestColumn::NeedsTransport => "needs_transport",
            GuestColumn::NeedsTransportBack => "needs_transport_back",
            GuestColumn::Disability => "disability",
            GuestColumn::Observations => "observations",
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            GuestColumn::FullName => "Nombre",
            GuestColumn::Phone => "Teléfono",
            GuestColumn::Email => "Email",
            GuestColumn::Menu => "Menú",
            GuestColumn::Allergies => "Alergias",
            GuestColumn::Tags => "Etiquetas",
            GuestColumn::Validated => "Validado",
            GuestColumn::AccommodationPlan => "Alojamiento",
            GuestColumn::NeedsHotel => "Hotel",
            GuestColumn::NeedsTransport => "Transporte ida",
            GuestColumn::NeedsTransportBack => "Transporte vuelta",
            GuestColumn::Disability => "Movilidad reducida",
            GuestColumn::Observations => "Observaciones",
        }
    }

    fn shown_by_default(self) -> bool {
        !matches!(
            self,
            GuestColumn::AccommodationPlan | GuestColumn::Disability | GuestColumn::Observations
        )
    }
}

impl FromStr for GuestColumn {
    type Err = ViewConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GuestColumn::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| ViewConfigError::UnknownColumn(s.to_string()))
    }
}

/// Guest form fields that can be hidden (names are always shown)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GuestFormField {
    Phone,
    Email,
    Menu,
    Allergies,
    Tags,
    AccommodationPlan,
    Logistics,
    Disability,
    Observations,
    PlusOnes,
}

impl GuestFormField {
    pub const ALL: [GuestFormField; 10] = [
        GuestFormField::Phone,
        GuestFormField::Email,
        GuestFormField::Menu,
        GuestFormField::Allergies,
        GuestFormField::Tags,
        GuestFormField::AccommodationPlan,
        GuestFormField::Logistics,
        GuestFormField::Disability,
        GuestFormField::Observations,
        GuestFormField::PlusOnes,
    ];

    pub fn key(self) -> &'static str {
        match self {
            GuestFormField::Phone => "phone",
            GuestFormField::Email => "email",
            GuestFormField::Menu => "menu",
            GuestFormField::Allergies => "allergies",
            GuestFormField::Tags => "tags",
            GuestFormField::AccommodationPlan => "accommodation_plan",
            GuestFormField::Logistics => "logistics",
            GuestFormField::Disability => "disability",
            GuestFormField::Observations => "observations",
            GuestFormField::PlusOnes => "plus_ones",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GuestFormField::Phone => "Teléfono",
            GuestFormField::Email => "Email",
            GuestFormField::Menu => "Menú",
            GuestFormField::Allergies => "Alergias",
            GuestFormField::Tags => "Etiquetas",
            GuestFormField::AccommodationPlan => "Alojamiento",
            GuestFormField::Logistics => "Hotel y transporte",
            GuestFormField::Disability => "Movilidad reducida",
            GuestFormField::Observations => "Observaciones",
            GuestFormField::PlusOnes => "Acompañantes",
        }
    }
}

impl FromStr for GuestFormField {
    type Err = ViewConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GuestFormField::ALL
            .into_iter()
            .find(|f| f.key() == s)
            .ok_or_else(|| ViewConfigError::UnknownFormField(s.to_string()))
    }
}

/// Visible guest table columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleColumns(BTreeSet<GuestColumn>);

impl Default for VisibleColumns {
    fn default() -> Self {
        Self(GuestColumn::ALL.into_iter().filter(|c| c.shown_by_default()).collect())
    }
}

impl VisibleColumns {
    /// Overlay a stored map on the defaults. Unknown keys are an error.
    pub fn from_map(map: &HashMap<String, bool>) -> Result<Self, ViewConfigError> {
        let mut visible = Self::default();
        for (key, shown) in map {
            let column: GuestColumn = key.parse()?;
            visible.set(column, *shown);
        }
        Ok(visible)
    }

    pub fn to_map(&self) -> HashMap<String, bool> {
        GuestColumn::ALL
            .into_iter()
            .map(|c| (c.key().to_string(), self.is_visible(c)))
            .collect()
    }

    pub fn is_visible(&self, column: GuestColumn) -> bool {
        self.0.contains(&column)
    }

    pub fn set(&mut self, column: GuestColumn, shown: bool) {
        if shown {
            self.0.insert(column);
        } else {
            self.0.remove(&column);
        }
    }

    /// Visible columns in display order
    pub fn columns(&self) -> Vec<GuestColumn> {
        self.0.iter().copied().collect()
    }
}

/// Visible guest form fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleFormFields(BTreeSet<GuestFormField>);

impl Default for VisibleFormFields {
    fn default() -> Self {
        Self(GuestFormField::ALL.into_iter().collect())
    }
}

impl VisibleFormFields {
    pub fn from_map(map: &HashMap<String, bool>) -> Result<Self, ViewConfigError> {
        let mut visible = Self::default();
        for (key, shown) in map {
            let field: GuestFormField = key.parse()?;
            visible.set(field, *shown);
        }
        Ok(visible)
    }

    pub fn to_map(&self) -> HashMap<String, bool> {
        GuestFormField::ALL
            .into_iter()
            .map(|f| (f.key().to_string(), self.is_visible(f)))
            .collect()
    }

    pub fn is_visible(&self, field: GuestFormField) -> bool {
        self.0.contains(&field)
    }

    pub fn set(&mut self, field: GuestFormField, shown: bool) {
        if shown {
            self.0.insert(field);
        } else {
            self.0.remove(&field);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, bool)]) -> HashMap<String, bool> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_defaults_hide_secondary_columns() {
        let visible = VisibleColumns::default();
        assert!(visible.is_visible(GuestColumn::FullName));
        assert!(!visible.is_visible(GuestColumn::Observations));
    }

    #[test]
    fn test_map_overlays_defaults() {
        let visible = VisibleColumns::from_map(&map(&[("observations", true), ("phone", false)])).unwrap();
        assert!(visible.is_visible(GuestColumn::Observations));
        assert!(!visible.is_visible(GuestColumn::Phone));
        assert!(visible.is_visible(GuestColumn::Email));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = VisibleColumns::from_map(&map(&[("shoe_size", true)])).unwrap_err();
        assert_eq!(err, ViewConfigError::UnknownColumn("shoe_size".to_string()));

        let err = VisibleFormFields::from_map(&map(&[("phone", true), ("nickname", false)])).unwrap_err();
        assert_eq!(err, ViewConfigError::UnknownFormField("nickname".to_string()));
    }

    #[test]
    fn test_columns_in_display_order() {
        let visible = VisibleColumns::from_map(&map(&[("observations", true)])).unwrap();
        let columns = visible.columns();
        assert_eq!(columns.first(), Some(&GuestColumn::FullName));
        assert_eq!(columns.last(), Some(&GuestColumn::Observations));
    }

    #[test]
    fn test_to_map_round_trips_through_from_map() {
        let mut visible = VisibleColumns::default();
        visible.set(GuestColumn::Disability, true);
        assert_eq!(VisibleColumns::from_map(&visible.to_map()).unwrap(), visible);
    }

    #[test]
    fn test_form_fields_hidden() {
        let fields = VisibleFormFields::from_map(&map(&[("plus_ones", false)])).unwrap();
        assert!(!fields.is_visible(GuestFormField::PlusOnes));
        assert!(fields.is_visible(GuestFormField::Menu));
    }
}
