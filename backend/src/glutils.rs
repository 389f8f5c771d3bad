use std::ffi::CStr;

use gl::types::GLenum;

/// Maps an OpenGL error code to its symbolic name.
///
/// Codes outside the set `glGetError` can report come back as
/// `UNKNOWN_ERROR`.
pub fn gl_error_name(code: GLenum) -> &'static str {
    match code {
        gl::INVALID_ENUM => "INVALID_ENUM",
        gl::INVALID_VALUE => "INVALID_VALUE",
        gl::INVALID_OPERATION => "INVALID_OPERATION",
        gl::OUT_OF_MEMORY => "OUT_OF_MEMORY",
        gl::INVALID_FRAMEBUFFER_OPERATION => "INVALID_FRAMEBUFFER_OPERATION",
        gl::CONTEXT_LOST => "CONTEXT_LOST",
        _ => "UNKNOWN_ERROR",
    }
}

/// Queries the pending GL error flag once and logs it with the call site.
///
/// Querying consumes the flag, so a second query reports nothing until the
/// driver raises a new error. Silent when no error is pending.
pub fn report_gl_errors(function: &str, file: &str, line: u32) {
    let err = unsafe { gl::GetError() };
    if err == gl::NO_ERROR {
        return;
    }
    log::error!(
        "OpenGL error in {} at line {} calling {}: {}",
        file,
        line,
        function,
        gl_error_name(err)
    );
}

/// Runs a GL call with an error check before and after it.
///
/// The pre-check surfaces (and clears) any stale error left by earlier
/// unchecked calls so the post-check attributes new errors to this call
/// alone. In release builds this is exactly the bare call.
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! checked_gl_call {
    ($call:expr) => {{
        $crate::glutils::report_gl_errors(
            concat!(">>BEFORE<< ", stringify!($call)),
            file!(),
            line!(),
        );
        let out = unsafe { $call };
        $crate::glutils::report_gl_errors(stringify!($call), file!(), line!());
        out
    }};
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! checked_gl_call {
    ($call:expr) => {
        unsafe { $call }
    };
}

/// Like [`checked_gl_call!`] but performs the post-call check only and
/// evaluates to the call's result. For calls whose value is consumed inline.
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! checked_gl_result {
    ($call:expr) => {{
        let out = unsafe { $call };
        $crate::glutils::report_gl_errors(stringify!($call), file!(), line!());
        out
    }};
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! checked_gl_result {
    ($call:expr) => {
        unsafe { $call }
    };
}

/// Surfaces any error already pending before an error-prone sequence,
/// without wrapping a call of its own.
#[cfg(debug_assertions)]
#[macro_export]
macro_rules! check_existing_errors {
    ($label:literal) => {
        $crate::glutils::report_gl_errors(concat!(">>BEFORE<< ", $label), file!(), line!());
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! check_existing_errors {
    ($label:literal) => {};
}

pub fn print_opengl_info() {
    let version = unsafe { gl::GetString(gl::VERSION) };
    if version.is_null() {
        return;
    }
    let version = unsafe { CStr::from_ptr(version.cast()) };
    println!("OpenGL Version: {}", version.to_string_lossy());
}

pub fn gl_buffer_data_arr_stat<T: Sized>(buffer: &[T]) {
    crate::checked_gl_call!(gl::BufferData(
        gl::ARRAY_BUFFER,
        std::mem::size_of_val(buffer) as isize,
        buffer.as_ptr().cast(),
        gl::STATIC_DRAW,
    ));
}

pub fn gl_buffer_data_element_stat<T: Sized>(buffer: &[T]) {
    crate::checked_gl_call!(gl::BufferData(
        gl::ELEMENT_ARRAY_BUFFER,
        std::mem::size_of_val(buffer) as isize,
        buffer.as_ptr().cast(),
        gl::STATIC_DRAW,
    ));
}

pub fn gl_vertex_attrib_ptr_enab(index: u32, size: u32, stride: u32, pointer: usize) {
    crate::checked_gl_call!(gl::VertexAttribPointer(
        index,
        size as i32,
        gl::FLOAT,
        gl::FALSE,
        (stride as usize * std::mem::size_of::<f32>()) as i32,
        (pointer * std::mem::size_of::<f32>()) as *const _,
    ));
    crate::checked_gl_call!(gl::EnableVertexAttribArray(index));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_names_match_the_gl_constants() {
        assert_eq!(gl_error_name(gl::INVALID_ENUM), "INVALID_ENUM");
        assert_eq!(gl_error_name(gl::INVALID_VALUE), "INVALID_VALUE");
        assert_eq!(gl_error_name(gl::INVALID_OPERATION), "INVALID_OPERATION");
        assert_eq!(gl_error_name(gl::OUT_OF_MEMORY), "OUT_OF_MEMORY");
        assert_eq!(
            gl_error_name(gl::INVALID_FRAMEBUFFER_OPERATION),
            "INVALID_FRAMEBUFFER_OPERATION"
        );
        assert_eq!(gl_error_name(gl::CONTEXT_LOST), "CONTEXT_LOST");
    }

    #[test]
    fn unmapped_codes_fall_back_to_unknown() {
        assert_eq!(gl_error_name(0xBAD0), "UNKNOWN_ERROR");
        assert_eq!(gl_error_name(gl::NO_ERROR), "UNKNOWN_ERROR");
    }

    #[test]
    #[ignore = "requires a live GL context"]
    fn report_is_silent_when_no_error_is_pending() {
        // Would test: report_gl_errors emits nothing after glGetError
        // returns NO_ERROR, and a second query stays silent.
    }
}
