use std::ffi::{CStr, CString};

use anyhow::{anyhow, Result};
use x11::xlib;

use crate::error::Error;

use super::{Backend, GroupNames, MAX_GROUPS};

// From X11/XKBlib.h and X11/extensions/XKB.h
const XKB_USE_CORE_KBD: u32 = 0x0100;
const XKB_SYMBOLS_NAME_MASK: u32 = 1 << 2;
const XKB_GROUP_NAMES_MASK: u32 = 1 << 12;
const XKB_ALL_CONTROLS_MASK: u64 = 0xF800_1FFF;
const XKB_ALL_COMPONENTS_MASK: u32 = 0x7F;
const XKB_MAJOR_VERSION: i32 = 1;
const XKB_MINOR_VERSION: i32 = 0;

const XKB_OD_SUCCESS: i32 = 0;
const XKB_OD_BAD_LIBRARY_VERSION: i32 = 1;
const XKB_OD_CONNECTION_REFUSED: i32 = 2;
const XKB_OD_NON_XKB_SERVER: i32 = 3;
const XKB_OD_BAD_SERVER_VERSION: i32 = 4;

/// Ref: <https://www.x.org/releases/current/doc/libX11/XKB/xkblib.html>
pub struct X11 {
    display_ptr: *mut xlib::Display,
}

impl X11 {
    /// Open `display`, or `$DISPLAY` when `None`, and negotiate XKB.
    pub fn init(display: Option<&str>) -> Result<Self, Error> {
        let name = display
            .map(CString::new)
            .transpose()
            .map_err(|e| Error::BackendUnavailable(e.to_string()))?;
        let name_ptr = name
            .as_ref()
            .map_or(std::ptr::null_mut(), |n| n.as_ptr() as *mut _);
        let mut event_code = 0;
        let mut error_code = 0;
        let mut major = XKB_MAJOR_VERSION;
        let mut minor = XKB_MINOR_VERSION;
        let mut reason = XKB_OD_SUCCESS;
        let display_ptr = unsafe {
            xlib::XkbIgnoreExtension(0);
            xlib::XkbOpenDisplay(
                name_ptr,
                &mut event_code,
                &mut error_code,
                &mut major,
                &mut minor,
                &mut reason,
            )
        };
        // Owned from here on, so it is closed on every path below.
        let x11 = (!display_ptr.is_null()).then(|| Self { display_ptr });
        let reason = match reason {
            XKB_OD_SUCCESS => None,
            XKB_OD_BAD_LIBRARY_VERSION => Some("Bad XKB library version."),
            XKB_OD_CONNECTION_REFUSED => {
                Some("Connection to X server refused.")
            }
            XKB_OD_NON_XKB_SERVER => Some("XKB not present."),
            XKB_OD_BAD_SERVER_VERSION => Some("Bad X11 server version."),
            _ => Some("Unknown XkbOpenDisplay failure."),
        };
        match (x11, reason) {
            (Some(x11), None) => {
                tracing::debug!(major, minor, "XKB initialized.");
                Ok(x11)
            }
            (_, Some(reason)) => {
                Err(Error::BackendUnavailable(reason.to_string()))
            }
            (None, None) => Err(Error::BackendUnavailable(
                "XkbOpenDisplay returned no display".to_string(),
            )),
        }
    }

    fn atom_name(&self, atom: xlib::Atom) -> Option<String> {
        if atom == 0 {
            return None;
        }
        let name_ptr = unsafe { xlib::XGetAtomName(self.display_ptr, atom) };
        if name_ptr.is_null() {
            tracing::warn!(atom, "XGetAtomName: Failed to get atom name.");
            return Some(String::new());
        }
        let name = unsafe { CStr::from_ptr(name_ptr) }
            .to_string_lossy()
            .into_owned();
        unsafe {
            xlib::XFree(name_ptr as *mut _);
        }
        Some(name)
    }
}

impl Backend for X11 {
    fn group_names(&self) -> Result<GroupNames> {
        let desc = Desc::alloc(self.display_ptr)?;
        let count = if unsafe {
            xlib::XkbGetControls(
                desc.display_ptr,
                XKB_ALL_CONTROLS_MASK as _,
                desc.ptr,
            )
        } == 0
            && !unsafe { (*desc.ptr).ctrls }.is_null()
        {
            Some(usize::from(unsafe { (*(*desc.ptr).ctrls).num_groups }))
        } else {
            None
        };
        let names = desc.names(XKB_GROUP_NAMES_MASK)?;
        let names = names.groups[..MAX_GROUPS]
            .iter()
            .map(|atom| self.atom_name(*atom))
            .collect();
        Ok(GroupNames { names, count })
    }

    fn symbols(&self) -> Result<String> {
        let desc = Desc::alloc(self.display_ptr)?;
        let names = desc.names(XKB_SYMBOLS_NAME_MASK)?;
        self.atom_name(names.symbols)
            .ok_or_else(|| anyhow!("symbols atom is None"))
    }

    fn current_group(&self) -> Result<usize> {
        let mut state: std::mem::MaybeUninit<xlib::XkbStateRec> =
            std::mem::MaybeUninit::uninit();
        if unsafe {
            xlib::XkbGetState(
                self.display_ptr,
                XKB_USE_CORE_KBD,
                state.as_mut_ptr(),
            )
        } > 0
        {
            return Err(anyhow!(
                "XkbGetState: Failed to retrieve keyboard state"
            ));
        }
        Ok(usize::from(unsafe { state.assume_init() }.group))
    }

    fn lock_group(&mut self, index: usize) -> Result<()> {
        let group = u32::try_from(index)?;
        if unsafe {
            xlib::XkbLockGroup(self.display_ptr, XKB_USE_CORE_KBD, group)
        } == 0
        {
            return Err(anyhow!("XkbLockGroup: Failed to lock group {}", index));
        }
        // Flush the request before the state is read back.
        unsafe {
            xlib::XSync(self.display_ptr, 0);
        }
        Ok(())
    }
}

impl Drop for X11 {
    fn drop(&mut self) {
        tracing::debug!("Closing display.");
        unsafe {
            xlib::XCloseDisplay(self.display_ptr);
        }
    }
}

/// A keyboard description, freed on drop.
struct Desc {
    display_ptr: *mut xlib::Display,
    ptr: xlib::XkbDescPtr,
}

impl Desc {
    fn alloc(display_ptr: *mut xlib::Display) -> Result<Self> {
        let ptr = unsafe { xlib::XkbAllocKeyboard() };
        if ptr.is_null() {
            return Err(anyhow!(
                "XkbAllocKeyboard: Failed to allocate keyboard"
            ));
        }
        Ok(Self { display_ptr, ptr })
    }

    fn names(&self, which: u32) -> Result<&xlib::_XkbNamesRec> {
        if unsafe { xlib::XkbGetNames(self.display_ptr, which, self.ptr) } > 0
        {
            return Err(anyhow!("XkbGetNames: Failed to retrieve names"));
        }
        let names_ptr = unsafe { (*self.ptr).names };
        if names_ptr.is_null() {
            return Err(anyhow!("Failed to get keyboard description"));
        }
        Ok(unsafe { &*names_ptr })
    }
}

impl Drop for Desc {
    fn drop(&mut self) {
        unsafe {
            xlib::XkbFreeKeyboard(self.ptr, XKB_ALL_COMPONENTS_MASK, 1);
        }
    }
}
