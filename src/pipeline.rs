pub mod mesh_instance;
