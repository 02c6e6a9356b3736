//! Add-task form for the terminal user interface.
//!
//! Three fields in visual order: name, due date, priority selector. The form
//! validates on submit only; until then any state is allowed.

use chrono::NaiveDate;

use crate::fields::Priority;
use crate::store::parse_date_input;
use crate::tui::input::InputField;

pub const NAME_FIELD: usize = 0;
pub const DATE_FIELD: usize = 1;
pub const PRIORITY_FIELD: usize = 2;
const FIELD_COUNT: usize = 3;

/// Form state for adding a task.
pub struct AddForm {
    pub name: InputField,
    pub date: InputField,
    pub priority: usize,
    pub priorities: Vec<Priority>,
    pub current_field: usize,
}

impl AddForm {
    pub fn new() -> Self {
        let mut form = AddForm {
            name: InputField::new(),
            date: InputField::new(),
            priority: 1, // Medium
            priorities: vec![Priority::Low, Priority::Medium, Priority::High],
            current_field: NAME_FIELD,
        };
        form.update_active_field();
        form
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            FIELD_COUNT - 1
        } else {
            self.current_field - 1
        };
        self.update_active_field();
    }

    fn update_active_field(&mut self) {
        self.name.active = self.current_field == NAME_FIELD;
        self.date.active = self.current_field == DATE_FIELD;
    }

    /// Character input for the active text field.
    pub fn handle_char(&mut self, c: char) {
        match self.current_field {
            NAME_FIELD => self.name.insert(c),
            DATE_FIELD => self.date.insert(c),
            _ => {}
        }
    }

    /// Backspace for the active text field.
    pub fn handle_backspace(&mut self) {
        match self.current_field {
            NAME_FIELD => self.name.backspace(),
            DATE_FIELD => self.date.backspace(),
            _ => {}
        }
    }

    /// Left/right: cursor movement in text fields, cycling on the selector.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.current_field {
            NAME_FIELD => {
                if right {
                    self.name.right()
                } else {
                    self.name.left()
                }
            }
            DATE_FIELD => {
                if right {
                    self.date.right()
                } else {
                    self.date.left()
                }
            }
            PRIORITY_FIELD => {
                if right {
                    self.priority = (self.priority + 1) % self.priorities.len();
                } else {
                    self.priority = if self.priority == 0 {
                        self.priorities.len() - 1
                    } else {
                        self.priority - 1
                    };
                }
            }
            _ => {}
        }
    }

    pub fn selected_priority(&self) -> Priority {
        self.priorities[self.priority]
    }

    /// Validate the form. Both text fields are required; the date must parse.
    /// Leaves the form untouched either way.
    pub fn validate(&self) -> Result<(String, NaiveDate, Priority), String> {
        if self.name.is_empty() {
            return Err("Name is required.".into());
        }
        if self.date.is_empty() {
            return Err("Due date is required.".into());
        }
        let date = parse_date_input(&self.date.value)
            .ok_or_else(|| format!("Unrecognised date '{}'.", self.date.value.trim()))?;
        Ok((
            self.name.value.trim().to_string(),
            date,
            self.selected_priority(),
        ))
    }

    /// Reset all fields after a successful add.
    pub fn clear(&mut self) {
        self.name.clear();
        self.date.clear();
        self.priority = 1;
        self.current_field = NAME_FIELD;
        self.update_active_field();
    }
}

impl Default for AddForm {
    fn default() -> Self {
        Self::new()
    }
}
