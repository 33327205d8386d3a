pub mod mp_user;
