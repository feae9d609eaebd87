//! Naming helpers for code generation
//!
//! Every generated file name and identifier is derived from the table name
//! through the pure functions here, so they are tested on their own.

use inflector::Inflector;

/// Casing and inflection helpers
pub struct TemplateHelpers;

impl TemplateHelpers {
    /// Convert string to `PascalCase` ("studly" case)
    ///
    /// # Examples
    ///
    /// ```
    /// # use catalog_scaffold::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_pascal_case("user_profile"), "UserProfile");
    /// assert_eq!(TemplateHelpers::to_pascal_case("product"), "Product");
    /// ```
    #[must_use]
    pub fn to_pascal_case(input: &str) -> String {
        input.to_pascal_case()
    }

    /// Convert string to camelCase
    ///
    /// # Examples
    ///
    /// ```
    /// # use catalog_scaffold::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_camel_case("user_profiles"), "userProfiles");
    /// assert_eq!(TemplateHelpers::to_camel_case("UserProfile"), "userProfile");
    /// ```
    #[must_use]
    pub fn to_camel_case(input: &str) -> String {
        input.to_camel_case()
    }

    /// Singularize the last word of a `snake_case` name
    ///
    /// Only the final segment is inflected, so `order_items` becomes
    /// `order_item` rather than touching `order`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use catalog_scaffold::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::singularize("products"), "product");
    /// assert_eq!(TemplateHelpers::singularize("categories"), "category");
    /// assert_eq!(TemplateHelpers::singularize("order_items"), "order_item");
    /// ```
    ///
    /// # Note
    ///
    /// The inflector library has known limitations with some irregular singulars.
    /// Generated output is reviewed by a human, so this is acceptable.
    #[must_use]
    pub fn singularize(input: &str) -> String {
        match input.rsplit_once('_') {
            Some((head, last)) => format!("{head}_{}", last.to_singular()),
            None => input.to_singular(),
        }
    }

    /// Human-readable label for a column (`first_name` -> `First Name`)
    ///
    /// # Examples
    ///
    /// ```
    /// # use catalog_scaffold::scaffold::helpers::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_label("first_name"), "First Name");
    /// assert_eq!(TemplateHelpers::to_label("bio"), "Bio");
    /// ```
    #[must_use]
    pub fn to_label(column: &str) -> String {
        column.replace('_', " ").to_title_case()
    }
}

/// Identifiers derived from a table name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelNames {
    /// Table name as given (plural)
    pub table: String,
    /// Model class name: studly case of the singular table name
    pub model: String,
    /// Variable name for one record: camel case of the model name
    pub variable: String,
    /// Variable name for a collection: camel case of the table name
    pub variable_plural: String,
}

impl ModelNames {
    /// Derive all names from a plural table name
    ///
    /// # Examples
    ///
    /// ```
    /// # use catalog_scaffold::scaffold::helpers::ModelNames;
    /// let names = ModelNames::from_table("user_profiles");
    /// assert_eq!(names.model, "UserProfile");
    /// assert_eq!(names.variable, "userProfile");
    /// assert_eq!(names.variable_plural, "userProfiles");
    /// ```
    #[must_use]
    pub fn from_table(table: &str) -> Self {
        let model = TemplateHelpers::to_pascal_case(&TemplateHelpers::singularize(table));
        Self {
            table: table.to_string(),
            variable: TemplateHelpers::to_camel_case(&model),
            variable_plural: TemplateHelpers::to_camel_case(table),
            model,
        }
    }

    /// Controller class name
    #[must_use]
    pub fn controller(&self) -> String {
        format!("{}Controller", self.model)
    }

    /// Form-request class name
    #[must_use]
    pub fn request(&self) -> String {
        format!("{}Request", self.model)
    }

    /// Permissions seeder class name
    #[must_use]
    pub fn seeder(&self) -> String {
        format!("{}PermissionsSeeder", self.model)
    }

    /// Permission names guarding the resource, in CRUD order
    #[must_use]
    pub fn permissions(&self) -> [String; 4] {
        ["view", "create", "edit", "delete"].map(|action| format!("{action} {}", self.table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case() {
        assert_eq!(TemplateHelpers::to_pascal_case("user_profile"), "UserProfile");
        assert_eq!(TemplateHelpers::to_pascal_case("http_request"), "HttpRequest");
        assert_eq!(TemplateHelpers::to_pascal_case("Simple"), "Simple");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(TemplateHelpers::to_camel_case("user_profile"), "userProfile");
        assert_eq!(TemplateHelpers::to_camel_case("Product"), "product");
        assert_eq!(TemplateHelpers::to_camel_case("simple"), "simple");
    }

    #[test]
    fn test_singularize() {
        assert_eq!(TemplateHelpers::singularize("posts"), "post");
        assert_eq!(TemplateHelpers::singularize("categories"), "category");
        assert_eq!(TemplateHelpers::singularize("comments"), "comment");
        assert_eq!(TemplateHelpers::singularize("user_profiles"), "user_profile");
    }

    #[test]
    fn test_label() {
        assert_eq!(TemplateHelpers::to_label("first_name"), "First Name");
        assert_eq!(TemplateHelpers::to_label("email_verified_at"), "Email Verified At");
        assert_eq!(TemplateHelpers::to_label("title"), "Title");
    }

    #[test]
    fn test_model_names() {
        let names = ModelNames::from_table("products");
        assert_eq!(names.table, "products");
        assert_eq!(names.model, "Product");
        assert_eq!(names.variable, "product");
        assert_eq!(names.variable_plural, "products");
        assert_eq!(names.controller(), "ProductController");
        assert_eq!(names.request(), "ProductRequest");
        assert_eq!(names.seeder(), "ProductPermissionsSeeder");
    }

    #[test]
    fn test_model_names_multi_word() {
        let names = ModelNames::from_table("order_items");
        assert_eq!(names.model, "OrderItem");
        assert_eq!(names.variable, "orderItem");
        assert_eq!(names.variable_plural, "orderItems");
    }

    #[test]
    fn test_permissions() {
        let names = ModelNames::from_table("products");
        assert_eq!(
            names.permissions(),
            [
                "view products".to_string(),
                "create products".to_string(),
                "edit products".to_string(),
                "delete products".to_string(),
            ]
        );
    }
}
