mod federated;
mod helpers;
mod pages;
mod register;
mod session;
mod signin;
mod signout;
