//! Hook-style access to a form controller
//!
//! Components hold a [`FormHandle`] returned by [`use_form`]. Handles are
//! cheap to clone and every clone drives the same [`FormController`], so a
//! handle can be moved into as many event callbacks as a component needs.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐  clone   ┌────────────┐
//! │ FormHandle │ ───────▶ │ FormHandle │ ──▶ on_change / on_form_change
//! └─────┬──────┘          └─────┬──────┘
//!       │  Rc<RefCell<…>>       │
//!       └──────────┬────────────┘
//!                  ▼
//!          ┌────────────────┐
//!          │ FormController │ ──▶ FormState { data, is_loading, error }
//!          └────────────────┘
//! ```
//!
//! Handles are tied to the single-threaded UI event loop (`Rc`), and must
//! not be used from inside a schema or transform of the same form.
//!
//! ## Example
//!
//! ```
//! use reinhardt_form_state::{AcceptAll, ChangeEvent, FormConfig, use_form};
//!
//! let form = use_form(FormConfig::default(), AcceptAll);
//! let on_form_change = form.on_form_change();
//!
//! on_form_change(&ChangeEvent::new("user.name", "Ann"));
//! assert_eq!(form.get_value("user.name").as_str(), Some("Ann"));
//! assert!(form.validate());
//! ```

use crate::config::FormConfig;
use crate::controller::{FormController, FormState, StateField};
use crate::error::FormStateResult;
use crate::event::ChangeEvent;
use crate::schema::Schema;
use crate::validation::ValidationError;
use crate::value::{FormData, FormValue};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Create a form and return a handle to it.
pub fn use_form(options: FormConfig, schema: impl Schema + Send + Sync + 'static) -> FormHandle {
	FormHandle::new(FormController::from_config(options, schema))
}

/// Shared handle to a [`FormController`].
#[derive(Clone)]
pub struct FormHandle {
	inner: Rc<RefCell<FormController>>,
}

impl FormHandle {
	pub fn new(controller: FormController) -> Self {
		Self {
			inner: Rc::new(RefCell::new(controller)),
		}
	}

	/// Current form data (shares storage with the controller).
	pub fn data(&self) -> FormData {
		self.inner.borrow().data().clone()
	}

	pub fn is_loading(&self) -> bool {
		self.inner.borrow().is_loading()
	}

	pub fn error(&self) -> Option<Vec<ValidationError>> {
		self.inner.borrow().error().map(<[ValidationError]>::to_vec)
	}

	/// Copy of the whole current state.
	pub fn snapshot(&self) -> FormState {
		self.inner.borrow().state().clone()
	}

	pub fn set_field(&self, field: StateField) {
		self.inner.borrow_mut().set_field(field);
	}

	pub fn set_field_by_name(&self, key: &str, value: serde_json::Value) -> FormStateResult<()> {
		self.inner.borrow_mut().set_field_by_name(key, value)
	}

	pub fn update_state<F>(&self, f: F)
	where
		F: FnOnce(&FormState) -> FormState,
	{
		self.inner.borrow_mut().update_state(f);
	}

	pub fn update_field(&self, path: &str, value: impl Into<FormValue>) {
		self.inner.borrow_mut().update_field(path, value);
	}

	pub fn handle_change_event(&self, event: &ChangeEvent) {
		self.inner.borrow_mut().handle_change_event(event);
	}

	pub fn validate(&self) -> bool {
		self.inner.borrow_mut().validate()
	}

	pub fn get_field_error(&self, name: &str) -> String {
		self.inner.borrow().get_field_error(name).to_owned()
	}

	pub fn get_value(&self, path: &str) -> FormValue {
		self.inner.borrow().get_value(path)
	}

	pub fn clear_errors(&self) {
		self.inner.borrow_mut().clear_errors();
	}

	/// Run `f` with read access to the controller.
	pub fn with_controller<R>(&self, f: impl FnOnce(&FormController) -> R) -> R {
		f(&self.inner.borrow())
	}

	/// Callback writing a value at a path, for inputs that report
	/// `(name, value)` pairs.
	pub fn on_change(&self) -> impl Fn(&str, FormValue) + 'static {
		let handle = self.clone();
		move |path, value| handle.update_field(path, value)
	}

	/// Callback for input change events.
	pub fn on_form_change(&self) -> impl Fn(&ChangeEvent) + 'static {
		let handle = self.clone();
		move |event| handle.handle_change_event(event)
	}

	/// Callback replacing one state attribute.
	pub fn state_update(&self) -> impl Fn(StateField) + 'static {
		let handle = self.clone();
		move |field| handle.set_field(field)
	}

	/// Whether both handles drive the same controller.
	pub fn ptr_eq(&self, other: &FormHandle) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl fmt::Debug for FormHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.inner.try_borrow() {
			Ok(controller) => f.debug_tuple("FormHandle").field(&*controller).finish(),
			Err(_) => f.write_str("FormHandle(<borrowed>)"),
		}
	}
}
