//! Request handlers.
//!
//! A handler reads the [`Request`] and fills in the [`Response`]. It is called
//! synchronously, the reply is posted as soon as it returns. A handler failing
//! with an error means no reply is posted for that message.

use crate::protocol::{Request, Response};
use std::error::Error;

pub trait Handler {
    type Error: Into<Box<dyn Error + Send + Sync>>;

    fn call(&self, request: &Request, response: &mut Response) -> Result<(), Self::Error>;
}

#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

impl<F, Err> Handler for HandlerFn<F>
where
    F: Fn(&Request, &mut Response) -> Result<(), Err>,
    Err: Into<Box<dyn Error + Send + Sync>>,
{
    type Error = Err;

    fn call(&self, request: &Request, response: &mut Response) -> Result<(), Self::Error> {
        (self.f)(request, response)
    }
}

pub fn make_handler<F, Err>(f: F) -> HandlerFn<F>
where
    F: Fn(&Request, &mut Response) -> Result<(), Err>,
    Err: Into<Box<dyn Error + Send + Sync>>,
{
    HandlerFn { f }
}
