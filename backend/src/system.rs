use sdl2::event::{Event, WindowEvent};
use sdl2::video::GLProfile;

use crate::checked_gl_call;

/// Owns the window, the GL context and the SDL handles they hang off.
///
/// Everything lives on the thread that created it; the context and window
/// are torn down by `Drop` in reverse declaration order when the `System`
/// goes out of scope.
pub struct System {
    pub w: usize,
    pub h: usize,
    pub sdl_context: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_ctx: sdl2::video::GLContext,
}

impl System {
    pub fn new(title: &str, w: usize, h: usize) -> Result<System, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        // Core contexts on macOS refuse to come up without this.
        gl_attr.set_context_flags().forward_compatible().set();

        let window = match video_subsystem
            .window(title, w as u32, h as u32)
            .opengl()
            .resizable()
            .build()
        {
            Ok(w) => w,
            Err(e) => return Err(format!("Error while building OpenGL window: {e}")),
        };

        let gl_ctx = window.gl_create_context()?;
        gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _);

        debug_assert_eq!(gl_attr.context_profile(), GLProfile::Core);
        debug_assert_eq!(gl_attr.context_version(), (3, 3));

        Ok(System {
            w,
            h,
            sdl_context,
            video_subsystem,
            window,
            gl_ctx,
        })
    }

    /// Drains pending window events. Returns `false` once the window's
    /// close flag is set; resizes update the viewport to the new
    /// framebuffer dimensions as they arrive.
    pub fn process_events(&mut self) -> bool {
        let mut event_pump = self.sdl_context.event_pump().unwrap();

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => return false,
                Event::Window {
                    win_event: WindowEvent::SizeChanged(w, h),
                    ..
                } => {
                    self.w = w as usize;
                    self.h = h as usize;
                    let (fb_w, fb_h) = self.window.drawable_size();
                    checked_gl_call!(gl::Viewport(0, 0, fb_w as i32, fb_h as i32));
                }
                _ => {}
            }
        }
        true
    }

    pub fn swap_buffers(&self) {
        self.window.gl_swap_window();
    }
}
