//! Text fragments bound into stubs
//!
//! Each function turns part of a table schema into the exact text a stub
//! placeholder receives. Indentation matches where the placeholder sits in
//! the embedded stubs.

use super::helpers::{ModelNames, TemplateHelpers};
use super::type_map::{script_property_type, SqlTypeFamily, ValidationRule};
use crate::schema::ColumnDescriptor;

/// Quoted, comma-separated fillable column names (`'a', 'b'`)
///
/// Empty when there is nothing fillable.
#[must_use]
pub fn fillable_list(fillable: &[&ColumnDescriptor]) -> String {
    fillable
        .iter()
        .map(|column| format!("'{}'", column.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One validation rule line per fillable column
///
/// # Examples
///
/// ```
/// # use catalog_scaffold::schema::ColumnDescriptor;
/// # use catalog_scaffold::scaffold::fragments::rules_block;
/// let title = ColumnDescriptor::new("title", "varchar").with_length(120);
/// assert_eq!(
///     rules_block(&[&title]),
///     "            'title' => 'required|string|max:120',"
/// );
/// ```
#[must_use]
pub fn rules_block(fillable: &[&ColumnDescriptor]) -> String {
    fillable
        .iter()
        .map(|column| {
            format!(
                "            '{}' => '{}',",
                column.name,
                ValidationRule::for_column(column)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The four permission names, one quoted array entry per line
#[must_use]
pub fn permissions_block(names: &ModelNames) -> String {
    names
        .permissions()
        .iter()
        .map(|permission| format!("            '{permission}',"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sortable table column definitions for the index page
///
/// Every definition ends with a comma so the stub can follow it with the
/// actions column.
#[must_use]
pub fn column_definitions(fillable: &[&ColumnDescriptor]) -> String {
    fillable
        .iter()
        .map(|column| column_definition(&column.name))
        .collect::<Vec<_>>()
        .join("\n    ")
}

fn column_definition(name: &str) -> String {
    let label = TemplateHelpers::to_label(name);
    format!(
        "{{
        accessorKey: '{name}',
        header: ({{ column }}) => (
            <Button variant=\"ghost\" onClick={{() => column.toggleSorting(column.getIsSorted() === 'asc')}}>
                {label}
                <ArrowUpDown className=\"ml-2 h-4 w-4\" />
            </Button>
        ),
    }},"
    )
}

/// Interface members for every schema column (`    name: type;`)
///
/// Excluded columns still appear here; the page needs `id` and timestamps.
#[must_use]
pub fn interface_members(columns: &[ColumnDescriptor]) -> String {
    columns
        .iter()
        .map(|column| format!("    {}: {};", column.name, script_property_type(column)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Labelled input block per fillable column
#[must_use]
pub fn form_fields(fillable: &[&ColumnDescriptor]) -> String {
    fillable
        .iter()
        .map(|column| form_field(column))
        .collect::<Vec<_>>()
        .join("\n\n            ")
}

fn form_field(column: &ColumnDescriptor) -> String {
    let name = &column.name;
    let label = TemplateHelpers::to_label(name);
    let input_type = SqlTypeFamily::classify(&column.sql_type).input_type();
    let required = if column.nullable { "" } else { " required" };

    format!(
        "<div className=\"grid gap-2\">
                <Label htmlFor=\"{name}\">{label}</Label>
                <Input
                    id=\"{name}\"
                    type=\"{input_type}\"
                    value={{String(data.{name} ?? '')}}
                    onChange={{(e) => setData('{name}', e.target.value)}}{required}
                />
                {{errors.{name} && <p className=\"text-sm text-red-600\">{{errors.{name}}}</p>}}
            </div>"
    )
}
