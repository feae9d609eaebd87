//! SQL type classification for code generation
//!
//! Every declared column type is folded into a [`SqlTypeFamily`], which then
//! decides the validation token, the script-side scalar type and the form
//! input type. Classification is total: a type we have never heard of lands
//! in [`SqlTypeFamily::Other`] and is treated as text, so one exotic column
//! never stops a scaffolding run.
//!
//! | SQL type                              | Validation | Script type |
//! |---------------------------------------|------------|-------------|
//! | int, integer, bigint, smallint, tinyint | integer  | number      |
//! | decimal, float, double                | numeric    | number      |
//! | boolean, bool                         | boolean    | boolean     |
//! | date                                  | date       | string      |
//! | datetime, timestamp                   | date       | string      |
//! | json, jsonb                           | json       | any         |
//! | varchar, char, text                   | string (+ `max:N`) | string |
//! | anything else                         | string     | string      |

use crate::schema::ColumnDescriptor;
use std::fmt;

/// Family of SQL column types sharing generation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlTypeFamily {
    /// Whole numbers
    Integer,
    /// Fixed and floating point numbers
    Decimal,
    /// Booleans
    Boolean,
    /// Calendar date
    Date,
    /// Date with time
    DateTime,
    /// JSON documents
    Json,
    /// Bounded or unbounded character data
    Text,
    /// Anything unrecognized
    Other,
}

impl SqlTypeFamily {
    /// Classify a SQL type name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// # use catalog_scaffold::scaffold::type_map::SqlTypeFamily;
    /// assert_eq!(SqlTypeFamily::classify("bigint"), SqlTypeFamily::Integer);
    /// assert_eq!(SqlTypeFamily::classify("VARCHAR"), SqlTypeFamily::Text);
    /// assert_eq!(SqlTypeFamily::classify("geometry"), SqlTypeFamily::Other);
    /// ```
    #[must_use]
    pub fn classify(sql_type: &str) -> Self {
        match sql_type.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" | "bigint" | "smallint" | "tinyint" => Self::Integer,
            "decimal" | "float" | "double" => Self::Decimal,
            "boolean" | "bool" => Self::Boolean,
            "date" => Self::Date,
            "datetime" | "timestamp" => Self::DateTime,
            "json" | "jsonb" => Self::Json,
            "varchar" | "char" | "text" => Self::Text,
            _ => Self::Other,
        }
    }

    /// Validation rule token
    #[must_use]
    pub const fn validation_token(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Decimal => "numeric",
            Self::Boolean => "boolean",
            Self::Date | Self::DateTime => "date",
            Self::Json => "json",
            Self::Text | Self::Other => "string",
        }
    }

    /// Scalar type used in generated script interfaces
    #[must_use]
    pub const fn script_type(self) -> &'static str {
        match self {
            Self::Integer | Self::Decimal => "number",
            Self::Boolean => "boolean",
            Self::Json => "any",
            Self::Date | Self::DateTime | Self::Text | Self::Other => "string",
        }
    }

    /// HTML input type for generated form fields
    #[must_use]
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::Integer | Self::Decimal => "number",
            Self::Date => "date",
            Self::DateTime => "datetime-local",
            Self::Boolean | Self::Json | Self::Text | Self::Other => "text",
        }
    }

    /// Whether a declared length turns into a `max:N` rule
    #[must_use]
    pub const fn is_bounded_text(self) -> bool {
        matches!(self, Self::Text)
    }
}

/// Ordered validation tokens for one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRule {
    tokens: Vec<String>,
}

impl ValidationRule {
    /// Build the rule for a column
    ///
    /// # Examples
    ///
    /// ```
    /// # use catalog_scaffold::schema::ColumnDescriptor;
    /// # use catalog_scaffold::scaffold::type_map::ValidationRule;
    /// let title = ColumnDescriptor::new("title", "varchar").with_length(120);
    /// assert_eq!(ValidationRule::for_column(&title).to_string(), "required|string|max:120");
    /// ```
    #[must_use]
    pub fn for_column(column: &ColumnDescriptor) -> Self {
        let family = SqlTypeFamily::classify(&column.sql_type);
        let mut tokens = Vec::with_capacity(3);

        tokens.push(if column.nullable { "nullable" } else { "required" }.to_string());
        tokens.push(family.validation_token().to_string());

        if family.is_bounded_text() {
            if let Some(length) = column.length {
                tokens.push(format!("max:{length}"));
            }
        }

        Self { tokens }
    }

    /// Tokens in order
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl fmt::Display for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join("|"))
    }
}

/// Script property type for a column, `| null` appended when nullable
#[must_use]
pub fn script_property_type(column: &ColumnDescriptor) -> String {
    let base = SqlTypeFamily::classify(&column.sql_type).script_type();
    if column.nullable {
        format!("{base} | null")
    } else {
        base.to_string()
    }
}
