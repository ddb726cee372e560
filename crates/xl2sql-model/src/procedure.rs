//! Statement templates and their parameter contracts.

use std::collections::BTreeSet;

use crate::error::{ModelError, Result};
use crate::template::Template;

/// How a parameter's raw cell value is coerced before substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// Trimmed, quote-escaped text.
    Text,
    /// Floating-point number after separator/currency/percent clean-up.
    Numeric {
        /// Negative values are an invalid-value defect when quality checks run.
        non_negative: bool,
    },
}

impl ParameterKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Numeric { .. })
    }
}

/// Classification of the parameter names used by the built-in catalog.
///
/// Unknown names fall back to [`ParameterKind::Text`].
pub fn classify_parameter(name: &str) -> ParameterKind {
    match name {
        "qty" | "New_Current_Cost" | "new_Showroom" => ParameterKind::Numeric { non_negative: true },
        "Slp_Discount" | "Spv_Discount" | "Mgr_Discount" => {
            ParameterKind::Numeric { non_negative: false }
        }
        _ => ParameterKind::Text,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    pub kind: ParameterKind,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// A parameter classified by its name.
    pub fn classified(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = classify_parameter(&name);
        Self { name, kind }
    }
}

/// An immutable statement template plus its ordered parameter list.
///
/// The parameter order is also the order in which row fields are validated,
/// so it decides which skip reason wins when several fields are defective.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureDefinition {
    display_name: String,
    template: Template,
    parameters: Vec<ParameterSpec>,
}

impl ProcedureDefinition {
    /// Builds a definition whose parameter kinds follow [`classify_parameter`].
    pub fn new(display_name: &str, template: &str, parameters: &[&str]) -> Result<Self> {
        let specs = parameters
            .iter()
            .map(|name| ParameterSpec::classified(*name))
            .collect();
        Self::with_parameters(display_name, template, specs)
    }

    pub fn with_parameters(
        display_name: &str,
        template: &str,
        parameters: Vec<ParameterSpec>,
    ) -> Result<Self> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(ModelError::EmptyDisplayName);
        }
        if parameters.is_empty() {
            return Err(ModelError::NoParameters {
                procedure: display_name.to_string(),
            });
        }
        let mut seen = BTreeSet::new();
        for parameter in &parameters {
            if !seen.insert(parameter.name.as_str()) {
                return Err(ModelError::DuplicateParameter {
                    procedure: display_name.to_string(),
                    parameter: parameter.name.clone(),
                });
            }
        }
        let template = Template::parse(template)?;
        if let Some(placeholder) = template.placeholders().find(|name| !seen.contains(name)) {
            return Err(ModelError::UndeclaredPlaceholder {
                procedure: display_name.to_string(),
                placeholder: placeholder.to_string(),
            });
        }
        Ok(Self {
            display_name: display_name.to_string(),
            template,
            parameters,
        })
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|parameter| parameter.name.as_str())
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|parameter| parameter.name == name)
    }
}

const BUILTIN_PROCEDURES: &[(&str, &[&str], &str)] = &[
    (
        "Update Items Dropship Quantities",
        &["item", "qty"],
        "EXEC [dbo].[Hyou_UPDATE_EVS_ItemAddational_DROPSHIP_QTY_Excel] @ITEMNMBR = '{item}', @QTY = {qty:.3f}, @F1 = NULL, @F2 = NULL",
    ),
    (
        "Update Markdown Discounts",
        &["item", "Slp_Discount", "Spv_Discount", "Mgr_Discount"],
        "EXEC [dbo].[HYOU_SP_UPDATE_Makdown_Discount_All_Levels] @ITEMNMBR = '{item}', @Slp_Markdown = {Slp_Discount:.3f}, @Spv_Markdown = {Spv_Discount:.3f}, @Mgr_Markdown = {Mgr_Discount:.3f}",
    ),
    (
        "Update Items Current Cost",
        &["item", "New_Current_Cost"],
        "UPDATE IV00101 SET CURRCOST = {New_Current_Cost:.3f} WHERE ITEMNMBR = '{item}'",
    ),
    (
        "Update Items Status",
        &["item", "Status"],
        "UPDATE IV00101 SET USCATVLS_6 = '{Status}', INACTIVE = 1, ITEMTYPE = 2 WHERE ITEMNMBR = '{item}'",
    ),
    (
        "Update Items Prices",
        &["item", "new_Showroom"],
        "EXEC [dbo].[HYOU_SP_UPDATE_Item_Price_IV00108&More] @ITEMNMBR = '{item}', @PRCLEVEL = 'SHOWROOM', @PRICE = {new_Showroom:.3f}",
    ),
];

/// Display name of the procedure selected when none is configured.
pub const DEFAULT_PROCEDURE: &str = "Update Items Dropship Quantities";

/// Read-only registry of procedure definitions, kept in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureCatalog {
    procedures: Vec<ProcedureDefinition>,
}

impl ProcedureCatalog {
    pub fn new(procedures: Vec<ProcedureDefinition>) -> Result<Self> {
        let mut names = BTreeSet::new();
        for procedure in &procedures {
            if !names.insert(procedure.display_name()) {
                return Err(ModelError::DuplicateProcedure(
                    procedure.display_name().to_string(),
                ));
            }
        }
        Ok(Self { procedures })
    }

    /// The five procedures shipped with the tool.
    pub fn builtin() -> Result<Self> {
        let procedures = BUILTIN_PROCEDURES
            .iter()
            .map(|(name, parameters, template)| ProcedureDefinition::new(name, template, parameters))
            .collect::<Result<Vec<_>>>()?;
        Self::new(procedures)
    }

    pub fn get(&self, display_name: &str) -> Option<&ProcedureDefinition> {
        self.procedures
            .iter()
            .find(|procedure| procedure.display_name() == display_name)
    }

    /// Case-insensitive lookup used for user-typed names.
    pub fn find(&self, display_name: &str) -> Option<&ProcedureDefinition> {
        let wanted = display_name.trim();
        self.get(wanted).or_else(|| {
            self.procedures
                .iter()
                .find(|procedure| procedure.display_name().eq_ignore_ascii_case(wanted))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcedureDefinition> {
        self.procedures.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.procedures.iter().map(ProcedureDefinition::display_name)
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }
}
