pub mod count_membros_rto;
pub mod list_membros_rto;
