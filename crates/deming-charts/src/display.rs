//! On-screen window sink (winit + softbuffer), behind the `display` feature.
//!
//! Frames are drawn off-screen into RGB buffers and blitted to the window
//! surface. The call blocks until the window is closed and must run on the
//! main thread.

use deming_common::{DemingError, Result};
use std::cell::RefCell;
use std::num::NonZeroU32;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::WindowBuilder;

thread_local! {
    // winit refuses a second event loop per process, so one is kept and reused.
    static EVENT_LOOP: RefCell<Option<EventLoop<()>>> = const { RefCell::new(None) };
}

/// Open a window titled `title` and keep it painted with frames from
/// `render` until the user closes it.
///
/// `render` receives the current inner size and returns an RGB frame of
/// exactly that size. It is called again after every resize.
pub fn show<F>(title: &str, size: (u32, u32), render: F) -> Result<()>
where
    F: FnMut((u32, u32)) -> Result<Vec<u8>>,
{
    EVENT_LOOP.with(|cell| {
        let mut slot = cell.borrow_mut();
        let event_loop = slot.get_or_insert_with(EventLoop::new);
        run_window(event_loop, title, size, render)
    })
}

fn run_window<F>(event_loop: &mut EventLoop<()>, title: &str, size: (u32, u32), mut render: F) -> Result<()>
where
    F: FnMut((u32, u32)) -> Result<Vec<u8>>,
{
    // winit and softbuffer errors are not `Send + Sync`, so only their
    // message is kept.
    let window = WindowBuilder::new()
        .with_title(title)
        .with_inner_size(PhysicalSize::new(size.0, size.1))
        .build(event_loop)
        .map_err(|e| DemingError::window(format!("Failed to create window: {e}")))?;

    // SAFETY: `window` outlives both the context and the surface, which are
    // dropped at the end of this function.
    let context = unsafe { softbuffer::Context::new(&window) }
        .map_err(|e| DemingError::window(format!("Failed to create drawing context: {e}")))?;
    let mut surface = unsafe { softbuffer::Surface::new(&context, &window) }
        .map_err(|e| DemingError::window(format!("Failed to create window surface: {e}")))?;

    tracing::info!(title, width = size.0, height = size.1, "Opened chart window");

    let mut failure: Option<DemingError> = None;
    event_loop.run_return(|event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent { event, window_id } if window_id == window.id() => match event {
                WindowEvent::CloseRequested
                | WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(VirtualKeyCode::Escape),
                            ..
                        },
                    ..
                } => *control_flow = ControlFlow::Exit,
                WindowEvent::Resized(_) => window.request_redraw(),
                _ => {}
            },
            Event::RedrawRequested(window_id) if window_id == window.id() => {
                let inner = window.inner_size();
                if let Err(e) = paint(&mut surface, (inner.width, inner.height), &mut render) {
                    failure = Some(e);
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });

    tracing::info!(title, "Closed chart window");
    failure.map_or(Ok(()), Err)
}

fn paint<F>(surface: &mut softbuffer::Surface, (width, height): (u32, u32), render: &mut F) -> Result<()>
where
    F: FnMut((u32, u32)) -> Result<Vec<u8>>,
{
    // Minimized windows report a zero size.
    let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
        return Ok(());
    };

    let frame = render((width, height))?;
    surface
        .resize(w, h)
        .map_err(|e| DemingError::window(format!("Failed to resize surface: {e}")))?;

    let mut buffer = surface
        .buffer_mut()
        .map_err(|e| DemingError::window(format!("Failed to map surface buffer: {e}")))?;
    for (pixel, rgb) in buffer.iter_mut().zip(frame.chunks_exact(3)) {
        *pixel = to_0rgb(rgb);
    }
    buffer
        .present()
        .map_err(|e| DemingError::window(format!("Failed to present frame: {e}")))?;

    tracing::trace!(width, height, "Presented frame");
    Ok(())
}

/// Pack one RGB pixel into softbuffer's `0RGB` word
fn to_0rgb(rgb: &[u8]) -> u32 {
    (u32::from(rgb[0]) << 16) | (u32::from(rgb[1]) << 8) | u32::from(rgb[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_packing() {
        assert_eq!(to_0rgb(&[0xFF, 0x00, 0x00]), 0x00FF_0000);
        assert_eq!(to_0rgb(&[0x12, 0x34, 0x56]), 0x0012_3456);
        assert_eq!(to_0rgb(&[0xFF, 0xFF, 0xFF]), 0x00FF_FFFF);
    }
}
