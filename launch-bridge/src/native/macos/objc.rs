use std::ffi::{c_char, c_void, CString};
use std::mem;

use libloading::Library;

use crate::native::macos::library::function;
use crate::object::bridge_error::LaunchBridgeError;
use crate::object::bridge_error::LaunchBridgeError::SymbolUnavailable;

pub type Id = *mut c_void;
pub type Sel = *const c_void;
pub type Class = *mut c_void;

/// ObjC BOOL, signed char on x86_64 and bool on arm64; both fit one byte
pub type ObjcBool = i8;

type GetClassFn = unsafe extern "C" fn(*const c_char) -> Class;
type RegisterSelFn = unsafe extern "C" fn(*const c_char) -> Sel;
type RetainFn = unsafe extern "C" fn(Id) -> Id;
type ReleaseFn = unsafe extern "C" fn(Id);
type PoolPushFn = unsafe extern "C" fn() -> *mut c_void;
type PoolPopFn = unsafe extern "C" fn(*mut c_void);

/// libobjc entry points. objc_msgSend has no fixed signature, so it is kept
/// as an address and cast to the exact shape of each send below.
pub struct ObjcRuntime {
    msg_send: *const c_void,
    get_class: GetClassFn,
    register_sel: RegisterSelFn,
    retain: RetainFn,
    release: ReleaseFn,
    pool_push: PoolPushFn,
    pool_pop: PoolPopFn,
}

unsafe impl Send for ObjcRuntime {}
unsafe impl Sync for ObjcRuntime {}

impl ObjcRuntime {
    pub fn load(libobjc: &Library) -> Result<ObjcRuntime, LaunchBridgeError> {
        Ok(ObjcRuntime {
            msg_send: function::<*const c_void>(libobjc, "objc_msgSend")?,
            get_class: function(libobjc, "objc_getClass")?,
            register_sel: function(libobjc, "sel_registerName")?,
            retain: function(libobjc, "objc_retain")?,
            release: function(libobjc, "objc_release")?,
            pool_push: function(libobjc, "objc_autoreleasePoolPush")?,
            pool_pop: function(libobjc, "objc_autoreleasePoolPop")?,
        })
    }

    pub fn class(&self, name: &str) -> Option<Class> {
        let name = CString::new(name).ok()?;
        let class = unsafe { (self.get_class)(name.as_ptr()) };
        (!class.is_null()).then_some(class)
    }

    pub fn required_class(&self, name: &str) -> Result<Class, LaunchBridgeError> {
        self.class(name)
            .ok_or_else(|| SymbolUnavailable(format!("class {}", name)))
    }

    pub fn selector(&self, name: &str) -> Result<Sel, LaunchBridgeError> {
        let c_name =
            CString::new(name).map_err(|_| SymbolUnavailable(format!("selector {}", name)))?;
        let sel = unsafe { (self.register_sel)(c_name.as_ptr()) };

        if sel.is_null() {
            Err(SymbolUnavailable(format!("selector {}", name)))
        } else {
            Ok(sel)
        }
    }

    pub unsafe fn retain(&self, object: Id) -> Id {
        (self.retain)(object)
    }

    pub unsafe fn release(&self, object: Id) {
        (self.release)(object)
    }

    /// `[receiver sel]`
    pub unsafe fn send(&self, receiver: Id, sel: Sel) -> Id {
        let f: unsafe extern "C" fn(Id, Sel) -> Id = mem::transmute(self.msg_send);
        f(receiver, sel)
    }

    /// `[receiver sel:arg]`
    pub unsafe fn send_id(&self, receiver: Id, sel: Sel, arg: Id) -> Id {
        let f: unsafe extern "C" fn(Id, Sel, Id) -> Id = mem::transmute(self.msg_send);
        f(receiver, sel, arg)
    }

    /// `[receiver sel:first second:second]`
    pub unsafe fn send_id_id(&self, receiver: Id, sel: Sel, first: Id, second: Id) -> Id {
        let f: unsafe extern "C" fn(Id, Sel, Id, Id) -> Id = mem::transmute(self.msg_send);
        f(receiver, sel, first, second)
    }

    pub unsafe fn send_c_str(&self, receiver: Id, sel: Sel, arg: *const c_char) -> Id {
        let f: unsafe extern "C" fn(Id, Sel, *const c_char) -> Id = mem::transmute(self.msg_send);
        f(receiver, sel, arg)
    }

    pub unsafe fn send_bool(&self, receiver: Id, sel: Sel, arg: ObjcBool) -> Id {
        let f: unsafe extern "C" fn(Id, Sel, ObjcBool) -> Id = mem::transmute(self.msg_send);
        f(receiver, sel, arg)
    }

    pub unsafe fn send_i64(&self, receiver: Id, sel: Sel, arg: i64) -> Id {
        let f: unsafe extern "C" fn(Id, Sel, i64) -> Id = mem::transmute(self.msg_send);
        f(receiver, sel, arg)
    }

    pub unsafe fn send_usize(&self, receiver: Id, sel: Sel, arg: usize) -> Id {
        let f: unsafe extern "C" fn(Id, Sel, usize) -> Id = mem::transmute(self.msg_send);
        f(receiver, sel, arg)
    }

    /// Selectors returning `const char *`
    pub unsafe fn send_returning_c_str(&self, receiver: Id, sel: Sel) -> *const c_char {
        let f: unsafe extern "C" fn(Id, Sel) -> *const c_char = mem::transmute(self.msg_send);
        f(receiver, sel)
    }

    /// Selectors returning NSInteger
    pub unsafe fn send_returning_i64(&self, receiver: Id, sel: Sel) -> i64 {
        let f: unsafe extern "C" fn(Id, Sel) -> i64 = mem::transmute(self.msg_send);
        f(receiver, sel)
    }

    /// Selectors returning NSUInteger
    pub unsafe fn send_returning_usize(&self, receiver: Id, sel: Sel) -> usize {
        let f: unsafe extern "C" fn(Id, Sel) -> usize = mem::transmute(self.msg_send);
        f(receiver, sel)
    }
}

/// A +1 reference released exactly once on drop
pub struct OwnedObject {
    object: Id,
    runtime: &'static ObjcRuntime,
}

unsafe impl Send for OwnedObject {}

impl OwnedObject {
    /// Take over a reference the caller already owns (LSCopy*, alloc/init)
    pub unsafe fn adopt(runtime: &'static ObjcRuntime, object: Id) -> Option<OwnedObject> {
        (!object.is_null()).then_some(OwnedObject { object, runtime })
    }

    /// Retain an object borrowed from somewhere else, e.g. a completion
    /// handler argument that dies with the handler
    pub unsafe fn retain(runtime: &'static ObjcRuntime, object: Id) -> Option<OwnedObject> {
        if object.is_null() {
            return None;
        }

        log::trace!("objc_retain {:p}", object);
        Some(OwnedObject {
            object: runtime.retain(object),
            runtime,
        })
    }

    pub fn as_ptr(&self) -> Id {
        self.object
    }
}

impl Drop for OwnedObject {
    fn drop(&mut self) {
        log::trace!("objc_release {:p}", self.object);
        unsafe { self.runtime.release(self.object) }
    }
}

/// Autorelease pool scoped to one bridge call
pub struct AutoreleasePool {
    token: *mut c_void,
    runtime: &'static ObjcRuntime,
}

impl AutoreleasePool {
    pub fn push(runtime: &'static ObjcRuntime) -> AutoreleasePool {
        AutoreleasePool {
            token: unsafe { (runtime.pool_push)() },
            runtime,
        }
    }
}

impl Drop for AutoreleasePool {
    fn drop(&mut self) {
        if !self.token.is_null() {
            unsafe { (self.runtime.pool_pop)(self.token) }
        }
    }
}
