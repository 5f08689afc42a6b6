/*!

  An `ExpressionFormatter` holds information about how to format an expression, that is, how to express the
  expression as a string. Textual forms are for diagnostics and printing only; nothing parses them back.

  "Formatting" needs to be distinct from Rust's standard `Display` trait, because expressions are formatted
  differently depending on the requested form: the infix `Input` form (`2*x + sin(y)`) or the head-bracket `Full`
  form (`Add[Mul[2, x], Sin[y]]`), which shows the stored structure exactly. `Display` uses the default formatter.

*/

use strum::EnumString;


#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumString, Hash)]
pub enum DisplayForm {
  #[strum(serialize = "InputForm")]
  Input,
  #[strum(serialize = "FullForm")]
  Full,
}

impl Default for DisplayForm {
  fn default() -> DisplayForm {
    DisplayForm::Input
  }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Default)]
/// Parameters used in methods that transform expressions into strings.
pub struct ExpressionFormatter {
  pub form: DisplayForm,
}

impl From<DisplayForm> for ExpressionFormatter {
  fn from(form: DisplayForm) -> Self {
    ExpressionFormatter {
      form
    }
  }
}

pub trait Formattable {
  fn format(&self, formatter: &ExpressionFormatter) -> String;
}


macro_rules! display_formattable_impl {
  ($type_name:ty) => {
    impl std::fmt::Display for $type_name {
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format(&$crate::format::ExpressionFormatter::default()))
      }
    }
  }
}
