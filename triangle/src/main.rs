use backend::glutils::{
    gl_buffer_data_arr_stat, gl_buffer_data_element_stat, gl_vertex_attrib_ptr_enab,
    print_opengl_info,
};
use backend::shaders::{compile_shader_from_file, link_program, ShaderError, ShaderStage};
use backend::system::System;
use backend::{check_existing_errors, checked_gl_call, checked_gl_result};

const WINDOW_TITLE: &str = "Modern OpenGL";
const WINDOW_WIDTH: usize = 640;
const WINDOW_HEIGHT: usize = 480;

fn main() -> Result<(), ShaderError> {
    env_logger::init();

    let mut system = match System::new(WINDOW_TITLE, WINDOW_WIDTH, WINDOW_HEIGHT) {
        Ok(s) => s,
        Err(msg) => {
            log::error!("Failed to initialize window and OpenGL context: {msg}");
            std::process::exit(-1);
        }
    };

    print_opengl_info();

    #[rustfmt::skip]
    let vertices: [f32; 6] = [
         0.0,  0.5,
         0.5, -0.5,
        -0.5, -0.5,
    ];
    let elements: [u32; 3] = [0, 1, 2];

    check_existing_errors!("geometry setup");

    let mut vao = 0;
    checked_gl_call!(gl::GenVertexArrays(1, &mut vao));
    checked_gl_call!(gl::BindVertexArray(vao));

    let mut vbo = 0;
    checked_gl_call!(gl::GenBuffers(1, &mut vbo));
    checked_gl_call!(gl::BindBuffer(gl::ARRAY_BUFFER, vbo));
    gl_buffer_data_arr_stat(&vertices);

    let mut ebo = 0;
    checked_gl_call!(gl::GenBuffers(1, &mut ebo));
    checked_gl_call!(gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo));
    gl_buffer_data_element_stat(&elements);

    let vertex_shader = compile_shader_from_file("shaders/vertex.glsl", ShaderStage::Vertex)?;
    let fragment_shader = compile_shader_from_file("shaders/fragment.glsl", ShaderStage::Fragment)?;

    let program = link_program(vertex_shader, fragment_shader)?;
    checked_gl_call!(gl::UseProgram(program));

    // The attribute location is whatever the linker assigned, not a
    // hard-coded layout slot.
    let position_attribute = checked_gl_result!(gl::GetAttribLocation(program, c"position".as_ptr()));
    gl_vertex_attrib_ptr_enab(position_attribute as u32, 2, 0, 0);

    while system.process_events() {
        checked_gl_call!(gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT));
        checked_gl_call!(gl::DrawElements(
            gl::TRIANGLES,
            3,
            gl::UNSIGNED_INT,
            std::ptr::null(),
        ));
        system.swap_buffers();
    }

    checked_gl_call!(gl::DeleteProgram(program));
    checked_gl_call!(gl::DeleteShader(fragment_shader));
    checked_gl_call!(gl::DeleteShader(vertex_shader));
    checked_gl_call!(gl::DeleteBuffers(1, &ebo));
    checked_gl_call!(gl::DeleteBuffers(1, &vbo));
    checked_gl_call!(gl::DeleteVertexArrays(1, &vao));

    Ok(())
}
