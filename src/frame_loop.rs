use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::render::{request_animation_frame, AnimationFrame};

type FrameCallback = Rc<RefCell<Box<dyn FnMut(f64) -> bool>>>;

/// Runs a callback once per animation frame until it returns `false` or the
/// loop is dropped.
pub(crate) struct FrameLoop {
    handle: Rc<RefCell<Option<AnimationFrame>>>,
}

impl FrameLoop {
    pub(crate) fn start<F>(on_frame: F) -> Self
    where
        F: FnMut(f64) -> bool + 'static,
    {
        let handle = Rc::new(RefCell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(Box::new(on_frame)));
        schedule(Rc::downgrade(&handle), callback);
        Self { handle }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.handle.borrow().is_some()
    }
}

fn schedule(slot: Weak<RefCell<Option<AnimationFrame>>>, callback: FrameCallback) {
    let Some(handle) = slot.upgrade() else {
        return;
    };
    let next_slot = slot.clone();
    let frame = request_animation_frame(move |timestamp| {
        let keep_going = (callback.borrow_mut())(timestamp);
        if keep_going {
            schedule(next_slot, callback);
        } else if let Some(handle) = next_slot.upgrade() {
            handle.borrow_mut().take();
        }
    });
    *handle.borrow_mut() = Some(frame);
}
