pub mod lambda_client;
