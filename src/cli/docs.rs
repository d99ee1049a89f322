//! Documentation content for shunt CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Functions,
    Filters,
    Errors,
}

impl DocCategory {
    /// Parse category name from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" => Some(Self::Syntax),
            "operators" | "ops" | "precedence" => Some(Self::Operators),
            "functions" | "function" | "fns" => Some(Self::Functions),
            "filters" | "filter" | "boolean" => Some(Self::Filters),
            "errors" | "error" => Some(Self::Errors),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"SHUNT DOCUMENTATION

Shunt compiles two small expression languages with one shunting-yard engine:
scoring formulas (arithmetic over named variables) and boolean filters (named
leaf predicates combined with not/and/or).

DOCUMENTATION CATEGORIES

  syntax            Numbers, names, grouping and function calls
  operators         Operator priorities and how chains group
  functions         Built-in scoring functions
  filters           Filter expressions and the JSON tree they produce
  errors            Error kinds and what triggers them

QUICK REFERENCE

  shunt score 'Max(Views / 10, 1)' --var Views=250
  shunt filter 'Open and not Closed' --leaf Open --leaf Closed
  shunt rpn '1 + 2 * 3'
  shunt rpn 'A and B or C' --profile filter

Run 'shunt doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::parse(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Functions) => Ok(FUNCTIONS_DOC),
        Some(DocCategory::Filters) => Ok(FILTERS_DOC),
        Some(DocCategory::Errors) => Ok(ERRORS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Words, Numbers and Grouping

NUMBERS
  42   3.5   .25
    Digits with at most one '.'. A word that starts with a digit or '.' must
    stay numeric: '2x' is an invalid character error at 'x'.

NAMES
  Views   is_open   stats.total
    Letters, digits, '_' and '.', not starting with a digit or '.'.
    In formulas a name is a variable (or a function when followed by '(').
    In filters a name is a leaf resolved against the supplied leaves.

GROUPING
  (expr)
    Parentheses group in both languages and must balance.

FUNCTION CALLS (formulas only)
  Name(arg, arg, ...)
    The argument count must match the function's arity exactly.

    Example:
      Formula: Max(5 + 6, 1 * 10)
      Output:  11

WHITESPACE
    Spaces separate words but are otherwise ignored. In formulas operators
    and commas also separate words: 'a+b' is 'a + b'.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS - Priorities and Grouping

FORMULAS (higher binds tighter)
  -x      prefix minus     6
  /       division         5
  *       multiplication   4
  + -     add, subtract    3

FILTERS (higher binds tighter)
  and                      4
  or                       3
  not     prefix          -1

EQUAL PRIORITIES GROUP TO THE RIGHT
    An operator never displaces one of the same priority, so chains group
    from the right:

      1 - 2 - 3      is   1 - (2 - 3)   =  2
      8 / 4 / 2      is   8 / (4 / 2)   =  4

    Use parentheses for left grouping: (1 - 2) - 3.

PREFIX 'not' COVERS THE REST OF ITS GROUP
    'not' waits until its enclosing parenthesis closes (or the input ends):

      not A and B          is   not (A and B)
      (not A) and B        is   (not A) and B

ARITHMETIC
    IEEE-754 doubles. Division by zero yields inf or NaN, not an error.
"#;

const FUNCTIONS_DOC: &str = r#"FUNCTIONS - Built-in Scoring Functions

  Max(a, b)                 larger of a and b
  Min(a, b)                 smaller of a and b
  Clamp(value, min, max)    value limited to [min, max]
  Limit(value, max)         Clamp(value, 0, max)

  Examples:
    Max(Likes, 10)
    Clamp(Score * 2, 0, 100)
    Limit(Views / 1000, 5)

  Names are case-sensitive: 'max(1, 2)' is an unknown function.

  Library users can register more functions as (name, arity, builder)
  entries on a FunctionRegistry.
"#;

const FILTERS_DOC: &str = r#"FILTERS - Boolean Filter Expressions

SYNTAX
  Open and (Urgent or not Assigned)
    Names are leaves; 'not', 'and', 'or' are reserved (lowercase only).

LEAVES
  --leaves '{"Open": {"field": "state", "eq": "open"}}'
  --leaf Open
    Every name in the expression must be supplied. With --leaf the payload
    is the name itself.

OUTPUT
  Same-kind chains are flattened into one node:

    A and B and C or D
    => {"or": [{"and": ["A", "B", "C"]}, "D"]}

    not A
    => {"not": "A"}
"#;

const ERRORS_DOC: &str = r#"ERRORS - What Can Go Wrong

  invalid character        A character no word can contain, or a number
                           followed by letters ('2x', '1.2.3').
  unsupported token        A token in a place it cannot be used, such as a
                           number in a filter.
  invalid node count       Too few operands ('1 + + 2'), unbalanced
                           parentheses ('(1 + 2))'), a stray comma (', ,'),
                           wrong argument count, or two expressions side by
                           side ('A B').
  unknown leaf             A filter name missing from the supplied leaves.
  unknown function         A name followed by '(' that is not a function.
  unknown variable         A formula variable with no value (evaluation).

  Errors carry the character position of the offending token where one
  exists.
"#;
