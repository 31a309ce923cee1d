pub mod membro;
