/// Column and placeholder names for the food explorer inputs and output.
/// Single source of truth - every string-keyed lookup goes through here.

// ── Foods table columns ─────────────────────────────────────────────────────
pub mod foods {
    pub const SLUG: &str = "slug";
    pub const DROPDOWN: &str = "dropdown";
    pub const SINGULAR: &str = "singular";
    pub const PLURAL: &str = "plural";
    pub const TAGS: &str = "_tags";

    pub const REQUIRED: [&str; 5] = [SLUG, DROPDOWN, SINGULAR, PLURAL, TAGS];
}

// ── Views table columns ─────────────────────────────────────────────────────
pub mod views {
    pub const TITLE: &str = "title";
    pub const SUBTITLE: &str = "subtitle";
    pub const TAGS: &str = "_tags";

    pub const REQUIRED: [&str; 2] = [TITLE, TAGS];
}

// ── Join helper columns ─────────────────────────────────────────────────────
pub mod join {
    /// A single tag token after exploding a `_tags` list.
    pub const TAG: &str = "_tag";
    pub const VIEW_ROW: &str = "_view_row";
    pub const FOOD_ROW: &str = "_food_row";
}

// ── Grapher (output) columns ────────────────────────────────────────────────
pub mod grapher {
    pub const TITLE: &str = "title";
    pub const FOOD_DROPDOWN: &str = "Food Dropdown";
    pub const METRIC_DROPDOWN: &str = "Metric Dropdown";
    pub const UNIT_RADIO: &str = "Unit Radio";
    pub const PER_CAPITA_CHECKBOX: &str = "Per Capita Checkbox";
    pub const SUBTITLE: &str = "subtitle";
    pub const TYPE: &str = "type";
    pub const Y_SLUGS: &str = "ySlugs";
    pub const TABLE_SLUG: &str = "tableSlug";
    pub const HAS_MAP_TAB: &str = "hasMapTab";

    /// Preferred output column order. Extra columns follow, sorted.
    pub const COLUMN_ORDER: [&str; 10] = [
        TITLE,
        FOOD_DROPDOWN,
        METRIC_DROPDOWN,
        UNIT_RADIO,
        PER_CAPITA_CHECKBOX,
        SUBTITLE,
        TYPE,
        Y_SLUGS,
        TABLE_SLUG,
        HAS_MAP_TAB,
    ];
}

// ── Title placeholders ──────────────────────────────────────────────────────
pub mod title {
    pub const FOOD_SINGULAR: &str = "food_singular";
    pub const FOOD_SINGULAR_LOWER: &str = "food_singular_lower";
    pub const FOOD_PLURAL: &str = "food_plural";
    pub const FOOD_PLURAL_LOWER: &str = "food_plural_lower";
}

// ── Explorer template placeholders ──────────────────────────────────────────
pub mod template {
    pub const GRAPHERS_TSV: &str = "graphers_tsv";
    pub const TABLE_DEFS: &str = "table_defs";
    pub const FOOD_SLUGS: &str = "food_slugs";
}
