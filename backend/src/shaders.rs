use std::fmt;
use std::fs;

use gl::types::{GLenum, GLuint};
use thiserror::Error;

// Fixed-size fetch used on the failure paths; the standalone diagnostic
// below sizes its buffer exactly instead.
const INFO_LOG_BUF_LEN: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Errors raised while turning shader source files into GL objects.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to open shader file {path}: {source}")]
    FileOpen {
        path: String,
        source: std::io::Error,
    },
    #[error("{stage} shader compilation failed: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("program link error: {0}")]
    Link(String),
}

/// Reads GLSL source from `path` and compiles it as a `stage` shader.
///
/// The file is read before any driver call, so a missing file leaves the
/// GL state untouched. On a failed compile the driver's info log is
/// captured into the returned error.
pub fn compile_shader_from_file(path: &str, stage: ShaderStage) -> Result<GLuint, ShaderError> {
    let source = fs::read_to_string(path).map_err(|e| ShaderError::FileOpen {
        path: path.to_string(),
        source: e,
    })?;
    compile_shader_source(&source, stage)
}

pub fn compile_shader_source(source: &str, stage: ShaderStage) -> Result<GLuint, ShaderError> {
    let shader = unsafe { gl::CreateShader(stage.gl_enum()) };
    if shader == 0 {
        return Err(ShaderError::Compile {
            stage,
            log: "gl::CreateShader returned 0".to_string(),
        });
    }

    unsafe {
        gl::ShaderSource(
            shader,
            1,
            &(source.as_bytes().as_ptr().cast()),
            &(source.len() as i32),
        );
    }
    unsafe { gl::CompileShader(shader) };

    let mut success = 0;
    unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success) };

    if success == 0 {
        let mut v: Vec<u8> = Vec::with_capacity(INFO_LOG_BUF_LEN);
        let mut log_len = 0_i32;
        unsafe {
            gl::GetShaderInfoLog(
                shader,
                INFO_LOG_BUF_LEN as i32,
                &mut log_len,
                v.as_mut_ptr().cast(),
            );
            v.set_len(log_len.try_into().unwrap());
        }
        print_shader_info_log(shader);
        return Err(ShaderError::Compile {
            stage,
            log: String::from_utf8_lossy(&v).to_string(),
        });
    }

    print_shader_info_log(shader);
    Ok(shader)
}

/// Prints the shader's info log to stdout, if the driver produced one.
///
/// Sizes the buffer from `INFO_LOG_LENGTH` so nothing is truncated; some
/// drivers emit warnings here even for shaders that compiled cleanly.
pub fn print_shader_info_log(shader: GLuint) {
    let mut info_log_length = 0_i32;
    unsafe { gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut info_log_length) };

    if info_log_length > 0 {
        let mut v: Vec<u8> = Vec::with_capacity(info_log_length as usize);
        let mut chars_written = 0_i32;
        unsafe {
            gl::GetShaderInfoLog(
                shader,
                info_log_length,
                &mut chars_written,
                v.as_mut_ptr().cast(),
            );
            v.set_len(chars_written.try_into().unwrap());
        }
        println!("Shader Info Log:\n{}", String::from_utf8_lossy(&v));
    }
}

/// Links a compiled vertex and fragment shader into a program.
///
/// The link status is checked and the program info log returned on
/// failure. The caller keeps ownership of both shader handles.
pub fn link_program(vertex: GLuint, fragment: GLuint) -> Result<GLuint, ShaderError> {
    let program = unsafe { gl::CreateProgram() };
    if program == 0 {
        return Err(ShaderError::Link("gl::CreateProgram failed".to_string()));
    }

    unsafe { gl::AttachShader(program, vertex) };
    unsafe { gl::AttachShader(program, fragment) };
    unsafe { gl::LinkProgram(program) };

    let mut success = 0;
    unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut success) };
    if success == 0 {
        let mut v: Vec<u8> = Vec::with_capacity(INFO_LOG_BUF_LEN);
        let mut log_len = 0_i32;
        unsafe {
            gl::GetProgramInfoLog(
                program,
                INFO_LOG_BUF_LEN as i32,
                &mut log_len,
                v.as_mut_ptr().cast(),
            );
            v.set_len(log_len.try_into().unwrap());
        }
        return Err(ShaderError::Link(String::from_utf8_lossy(&v).to_string()));
    }

    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_fails_before_touching_the_driver() {
        // No GL context is loaded in tests; reaching any driver call
        // would panic inside the gl crate, so an Err here proves the
        // file read happens first.
        let err = compile_shader_from_file("shaders/no_such_file.glsl", ShaderStage::Vertex)
            .expect_err("expected a file-open error");
        match err {
            ShaderError::FileOpen { ref path, .. } => {
                assert_eq!(path, "shaders/no_such_file.glsl");
            }
            other => panic!("expected FileOpen, got: {other:?}"),
        }
    }

    #[test]
    fn file_open_error_display_names_the_path() {
        let err = compile_shader_from_file("shaders/no_such_file.glsl", ShaderStage::Fragment)
            .expect_err("expected a file-open error");
        let msg = format!("{err}");
        assert!(
            msg.contains("shaders/no_such_file.glsl"),
            "missing path in: {msg}"
        );
    }

    #[test]
    fn stages_map_to_the_matching_gl_enums() {
        assert_eq!(ShaderStage::Vertex.gl_enum(), gl::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_enum(), gl::FRAGMENT_SHADER);
    }

    #[test]
    fn stage_display_is_lowercase() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }

    #[test]
    fn compile_error_display_carries_stage_and_log() {
        let err = ShaderError::Compile {
            stage: ShaderStage::Fragment,
            log: "0:3: undeclared identifier".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("fragment"), "missing stage in: {msg}");
        assert!(
            msg.contains("undeclared identifier"),
            "missing log in: {msg}"
        );
    }

    #[test]
    fn link_error_display_carries_the_log() {
        let err = ShaderError::Link("varying mismatch".to_string());
        let msg = format!("{err}");
        assert!(msg.contains("varying mismatch"), "missing log in: {msg}");
    }

    #[test]
    fn shader_error_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ShaderError>();
    }

    #[test]
    #[ignore = "requires a live GL context"]
    fn valid_source_yields_a_usable_handle() {
        // Would test: compile_shader_source returns Ok for a minimal
        // 330 core shader and link_program links the pair.
    }
}
