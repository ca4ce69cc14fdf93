//! # Map Search Core
//!
//! Local storage for a map search app: the recent keyword history and the
//! last confirmed map marker, persisted in LMDB and exposed to the mobile host
//! through C-compatible functions that speak JSON.
//!
//! ## Features
//!
//! - **Keyword history**: most-recent-first, deduplicated, optional size cap
//! - **Last marker**: all-or-nothing restore of the last selected place
//! - **Storage-agnostic core**: both stores run on the [`kv_port::KeyValueStore`] port
//! - **Read-after-write**: every mutating call returns the fresh state
//!
//! ## Quick Start
//!
//! ```no_run
//! use map_search_core::{create_map_store, save_keyword, read_keywords};
//! use std::ffi::CString;
//!
//! let config = CString::new(r#"{"path":"map_search.lmdb"}"#).unwrap();
//! let state = create_map_store(config.as_ptr());
//!
//! let keyword = CString::new("카페").unwrap();
//! let keywords = save_keyword(state, keyword.as_ptr());
//! let same = read_keywords(state);
//! ```
//!
//! ## FFI Functions
//!
//! - [`create_map_store`] - Open the store from a JSON configuration
//! - [`read_keywords`] / [`save_keyword`] / [`delete_keyword`] - Keyword history
//! - [`load_last_position`] / [`save_last_position`] - Last marker
//! - [`select_search_result`] - Record a chosen result as keyword and marker
//! - [`show_search_results`] - Hand fetched results to the session
//! - [`read_snapshot`] - Keywords and marker in one call
//! - [`close_map_store`] - Release the handle
//! - [`free_response`] - Release a returned string
//!
//! Every function except [`create_map_store`] and [`free_response`] returns an
//! [`AppResponse`] serialized as JSON, e.g. `{"Ok":"[\"카페\"]"}` or
//! `{"ValidationError":"keyword must not be empty"}`.

pub mod keyword_history;
pub mod kv_port;
pub mod last_position;
pub mod lmdb_store;
pub mod map_search_error;
pub mod map_store_state;
pub mod search_model;
pub mod search_session;
pub mod store_config;
mod app_response;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use log::{info, warn};

use crate::map_store_state::MapStoreState;
use crate::search_model::SearchResultItem;
use crate::store_config::StoreConfig;

pub use crate::app_response::AppResponse;

/// Opens the map store described by a JSON [`StoreConfig`].
///
/// A null pointer or an empty string opens the store with the default
/// configuration.
///
/// # Returns
///
/// A pointer to the [`MapStoreState`] on success, or null on failure.
/// Release it with [`close_map_store`].
///
/// # Safety
///
/// `config_json` must be null or point to a valid null-terminated C string.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_map_store(config_json: *const c_char) -> *mut MapStoreState {
    let config = if config_json.is_null() {
        info!("No configuration passed to create_map_store; using defaults");
        StoreConfig::default()
    } else {
        let json = match unsafe { CStr::from_ptr(config_json).to_str() } {
            Ok(s) => s,
            Err(e) => {
                warn!("Invalid UTF-8 in config parameter: {e}");
                return std::ptr::null_mut();
            }
        };
        if json.trim().is_empty() {
            StoreConfig::default()
        } else {
            match StoreConfig::from_json(json) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Rejected map store configuration: {e}");
                    return std::ptr::null_mut();
                }
            }
        }
    };

    info!("Attempting to open map store at: {}", config.path.display());

    match MapStoreState::open(config) {
        Ok(state) => {
            info!("✅ Map store initialized successfully");
            Box::into_raw(Box::new(state))
        }
        Err(e) => {
            warn!("❌ Failed to initialize map store: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Returns the keyword history, most recent first, as a JSON array.
///
/// # Safety
///
/// `state` must be null or a live pointer returned by [`create_map_store`].
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn read_keywords(state: *mut MapStoreState) -> *const c_char {
    let state = match state_ref(state, "read_keywords") {
        Ok(s) => s,
        Err(err) => return err,
    };

    let response = match state.session() {
        Ok(session) => match session.history().read() {
            Ok(keywords) => AppResponse::json(&keywords),
            Err(e) => AppResponse::from(e),
        },
        Err(e) => AppResponse::from(e),
    };
    response_to_c_string(&response)
}

/// Saves a keyword (dedup and promote) and returns the refreshed history.
///
/// # Safety
///
/// `state` must be null or a live pointer returned by [`create_map_store`];
/// `keyword` must be null or a valid null-terminated C string.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn save_keyword(state: *mut MapStoreState, keyword: *const c_char) -> *const c_char {
    let state = match state_ref(state, "save_keyword") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let keyword = match c_ptr_to_string(keyword, "keyword") {
        Ok(k) => k,
        Err(err) => return err,
    };

    let response = match state.session() {
        Ok(mut session) => match session.save_keyword(&keyword) {
            Ok(keywords) => AppResponse::json(&keywords),
            Err(e) => AppResponse::from(e),
        },
        Err(e) => AppResponse::from(e),
    };
    response_to_c_string(&response)
}

/// Deletes a keyword if present and returns the refreshed history.
///
/// # Safety
///
/// `state` must be null or a live pointer returned by [`create_map_store`];
/// `keyword` must be null or a valid null-terminated C string.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn delete_keyword(state: *mut MapStoreState, keyword: *const c_char) -> *const c_char {
    let state = match state_ref(state, "delete_keyword") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let keyword = match c_ptr_to_string(keyword, "keyword") {
        Ok(k) => k,
        Err(err) => return err,
    };

    let response = match state.session() {
        Ok(mut session) => match session.delete_keyword(&keyword) {
            Ok(keywords) => AppResponse::json(&keywords),
            Err(e) => AppResponse::from(e),
        },
        Err(e) => AppResponse::from(e),
    };
    response_to_c_string(&response)
}

/// Returns the saved marker as JSON, or `"null"` when none is stored.
///
/// # Safety
///
/// `state` must be null or a live pointer returned by [`create_map_store`].
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn load_last_position(state: *mut MapStoreState) -> *const c_char {
    let state = match state_ref(state, "load_last_position") {
        Ok(s) => s,
        Err(err) => return err,
    };

    let response = match state.session() {
        Ok(mut session) => match session.restore_last_position() {
            Ok(marker) => AppResponse::json(&marker),
            Err(e) => AppResponse::from(e),
        },
        Err(e) => AppResponse::from(e),
    };
    response_to_c_string(&response)
}

/// Overwrites the saved marker with a [`SearchResultItem`] given as JSON.
///
/// Returns the stored marker on success.
///
/// # Safety
///
/// `state` must be null or a live pointer returned by [`create_map_store`];
/// `item_json` must be null or a valid null-terminated C string.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn save_last_position(state: *mut MapStoreState, item_json: *const c_char) -> *const c_char {
    let state = match state_ref(state, "save_last_position") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let item = match parse_item(item_json) {
        Ok(item) => item,
        Err(err) => return err,
    };

    let response = match state.session() {
        Ok(mut session) => match session.save_position(&item) {
            Ok(marker) => AppResponse::json(&marker),
            Err(e) => AppResponse::from(e),
        },
        Err(e) => AppResponse::from(e),
    };
    response_to_c_string(&response)
}

/// Confirms a search result: records its place name as a keyword and saves
/// it as the marker. Returns the refreshed [`search_model::SessionSnapshot`].
///
/// # Safety
///
/// `state` must be null or a live pointer returned by [`create_map_store`];
/// `item_json` must be null or a valid null-terminated C string.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn select_search_result(state: *mut MapStoreState, item_json: *const c_char) -> *const c_char {
    let state = match state_ref(state, "select_search_result") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let item = match parse_item(item_json) {
        Ok(item) => item,
        Err(err) => return err,
    };

    let response = match state.session() {
        Ok(mut session) => match session.select_result(&item) {
            Ok(snapshot) => AppResponse::json(&snapshot),
            Err(e) => AppResponse::from(e),
        },
        Err(e) => AppResponse::from(e),
    };
    response_to_c_string(&response)
}

/// Hands a JSON array of results fetched by the host to the session.
///
/// Returns the number of results now shown.
///
/// # Safety
///
/// `state` must be null or a live pointer returned by [`create_map_store`];
/// `items_json` must be null or a valid null-terminated C string.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn show_search_results(state: *mut MapStoreState, items_json: *const c_char) -> *const c_char {
    let state = match state_ref(state, "show_search_results") {
        Ok(s) => s,
        Err(err) => return err,
    };
    let json = match c_ptr_to_string(items_json, "results JSON") {
        Ok(j) => j,
        Err(err) => return err,
    };
    let items: Vec<SearchResultItem> = match serde_json::from_str(&json) {
        Ok(items) => items,
        Err(e) => {
            let error = AppResponse::SerializationError(format!("Invalid results JSON: {e}"));
            return response_to_c_string(&error);
        }
    };

    let response = match state.session() {
        Ok(mut session) => {
            let shown = session.show_results(items).len();
            AppResponse::Ok(shown.to_string())
        }
        Err(e) => AppResponse::from(e),
    };
    response_to_c_string(&response)
}

/// Returns keywords and the saved marker in one JSON object.
///
/// # Safety
///
/// `state` must be null or a live pointer returned by [`create_map_store`].
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn read_snapshot(state: *mut MapStoreState) -> *const c_char {
    let state = match state_ref(state, "read_snapshot") {
        Ok(s) => s,
        Err(err) => return err,
    };

    let response = match state.session() {
        Ok(session) => match session.snapshot() {
            Ok(snapshot) => AppResponse::json(&snapshot),
            Err(e) => AppResponse::from(e),
        },
        Err(e) => AppResponse::from(e),
    };
    response_to_c_string(&response)
}

/// Releases a handle returned by [`create_map_store`].
///
/// The pointer must not be used afterwards. LMDB flushes committed
/// transactions on every commit, so nothing is lost on close.
///
/// # Safety
///
/// `state` must be null or a live pointer returned by [`create_map_store`]
/// that has not been closed yet. It is dangling once this returns.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn close_map_store(state: *mut MapStoreState) -> *const c_char {
    if state.is_null() {
        let error = AppResponse::BadRequest("Null state pointer passed to close_map_store".to_string());
        return response_to_c_string(&error);
    }

    drop(unsafe { Box::from_raw(state) });
    info!("Map store closed");

    let success = AppResponse::Ok("Map store closed successfully".to_string());
    response_to_c_string(&success)
}

/// Releases a string returned by any function of this library.
///
/// # Safety
///
/// `ptr` must be null or a string returned by this library that has not
/// been freed yet. Each response is freed exactly once.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn free_response(ptr: *const c_char) {
    if ptr.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(ptr as *mut c_char) });
}

fn state_ref<'a>(state: *mut MapStoreState, caller: &str) -> Result<&'a MapStoreState, *const c_char> {
    match unsafe { state.as_ref() } {
        Some(s) => Ok(s),
        None => {
            let error = AppResponse::BadRequest(format!("Null state pointer passed to {caller}"));
            Err(response_to_c_string(&error))
        }
    }
}

fn parse_item(item_json: *const c_char) -> Result<SearchResultItem, *const c_char> {
    let json = c_ptr_to_string(item_json, "item JSON")?;
    serde_json::from_str(&json).map_err(|e| {
        let error = AppResponse::SerializationError(format!("Invalid item JSON: {e}"));
        response_to_c_string(&error)
    })
}

/// Serializes `response` to JSON and hands it out as a C string.
///
/// Returns null if serialization or C string creation fails.
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}

/// Converts a C string pointer to a `String`, answering null pointers and
/// invalid UTF-8 with a `BadRequest` response.
fn c_ptr_to_string(ptr: *const c_char, field_name: &str) -> Result<String, *const c_char> {
    if ptr.is_null() {
        let error = AppResponse::BadRequest(format!("Null {field_name} pointer"));
        return Err(response_to_c_string(&error));
    }

    match unsafe { CStr::from_ptr(ptr).to_str() } {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            let error = AppResponse::BadRequest(format!("Invalid UTF-8 in {field_name}: {e}"));
            Err(response_to_c_string(&error))
        }
    }
}
