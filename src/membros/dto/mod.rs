pub mod create_membro_dto;
